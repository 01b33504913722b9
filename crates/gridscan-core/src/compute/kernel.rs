use core::ops::Index;

use gridscan_runtime::kernel::KernelMetadata;

use super::{CompiledKernel, DebugInformation};
use crate::{Coordinate, Shape};

/// Name of the entry point of every emitted kernel.
pub const ENTRY_POINT: &str = "main";

/// Language tag of the emitted sources.
pub const LANG_TAG: &str = "wgsl";

/// A named input buffer of a kernel.
#[derive(new, Clone, Debug, PartialEq, Eq)]
pub struct KernelInput {
    /// Name of the argument, read in the source through `read_<name>(coords)`.
    pub name: &'static str,
    /// Shape of the tensor bound to the argument.
    pub shape: Shape,
}

/// A data-parallel kernel: one invocation per output coordinate, each writing a single value.
///
/// Invocations can't communicate, and no ordering between them may be assumed.
pub trait Kernel: KernelMetadata {
    /// The inputs read by the kernel, in binding order.
    fn inputs(&self) -> &[KernelInput];

    /// The shape of the output, which is also the invocation space.
    fn output_shape(&self) -> &Shape;

    /// The generated source, with a single `main` entry point.
    fn source(&self) -> String;

    /// The value written at `coordinate` by one invocation.
    fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32;

    /// Compile the kernel into its device representation.
    fn compile(&self) -> CompiledKernel {
        CompiledKernel {
            name: Some(self.name()),
            entry_point: ENTRY_POINT,
            source: self.source(),
            output_shape: self.output_shape().clone(),
            debug_info: Some(DebugInformation::new(LANG_TAG, self.id())),
        }
    }
}

/// Read-only view over the elements of an input tensor.
#[derive(new, Clone, Copy, Debug)]
pub struct TensorView<'a> {
    shape: &'a Shape,
    data: &'a [f32],
}

impl TensorView<'_> {
    /// Reads the element at the given coordinate.
    pub fn read(&self, coordinate: &Coordinate) -> f32 {
        self.data[self.shape.offset(coordinate)]
    }

    /// The shape of the viewed tensor.
    pub fn shape(&self) -> &Shape {
        self.shape
    }
}

/// The inputs of one dispatch, in the order declared by the kernel.
#[derive(new, Debug)]
pub struct Inputs<'a> {
    views: Vec<TensorView<'a>>,
}

impl<'a> Index<usize> for Inputs<'a> {
    type Output = TensorView<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.views[index]
    }
}

impl Inputs<'_> {
    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the kernel has no input.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
