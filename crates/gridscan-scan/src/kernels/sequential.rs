use gridscan_core::{prelude::*, ConfigurationError};

use super::base::{kernel_source, scan_indexer, Instruction};
use crate::{axis::AxisIndexer, instructions::float_literal};

/// Scans the whole axis in a single dispatch: every invocation folds the operation over the
/// axis positions preceding its own, left to right.
///
/// The work is `O(n * L)` for `n` outputs along an axis of length `L`, which is the cheapest
/// option for short axes.
///
/// Values are accumulated in `f32`: integer data only scans exactly while every partial result
/// stays below `2^24`.
#[derive(Debug)]
pub struct SequentialScanKernel {
    inputs: Vec<KernelInput>,
    output_shape: Shape,
    indexer: AxisIndexer,
    instruction: Instruction,
    exclusive: bool,
}

impl SequentialScanKernel {
    /// Create a sequential scan of `axis` over tensors of the given shape.
    pub fn new(
        shape: &Shape,
        axis: usize,
        instruction: Instruction,
        exclusive: bool,
    ) -> Result<Self, ConfigurationError> {
        let indexer = scan_indexer(shape, axis)?;

        Ok(Self {
            inputs: vec![KernelInput::new("x", shape.clone())],
            output_shape: shape.clone(),
            indexer,
            instruction,
            exclusive,
        })
    }
}

impl KernelMetadata for SequentialScanKernel {
    fn id(&self) -> KernelId {
        KernelId::new::<Self>().info((
            self.output_shape.dims(),
            self.indexer.axis(),
            self.instruction.expression(),
            self.instruction.identity().to_bits(),
            self.exclusive,
        ))
    }

    fn output_dims(&self) -> &[usize] {
        self.output_shape.dims()
    }
}

impl Kernel for SequentialScanKernel {
    fn inputs(&self) -> &[KernelInput] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    fn source(&self) -> String {
        let axis = self.indexer.axis_component("coords");
        let end = match self.exclusive {
            true => axis.clone(),
            false => format!("{axis} + 1"),
        };

        let body = format!(
            "var coords: {ty} = output_coords();
let end = {end};
var val: f32 = {init};
for (var idx: i32 = 0; idx < end; idx = idx + 1) {{
    {axis} = idx;
    val = {op}(val, read_x({coords}));
}}
write_output(val);",
            ty = self.indexer.coords_type(),
            init = float_literal(self.instruction.identity()),
            op = self.instruction.name(),
            coords = self.indexer.coords("coords"),
        );

        kernel_source(Some(&self.instruction.definition()), &body)
    }

    fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32 {
        let position = self.indexer.get(coordinate);
        let end = match self.exclusive {
            true => position,
            false => position + 1,
        };

        (0..end).fold(self.instruction.identity(), |val, idx| {
            let value = inputs[0].read(&self.indexer.with(coordinate, idx));
            self.instruction.apply(val, value)
        })
    }
}
