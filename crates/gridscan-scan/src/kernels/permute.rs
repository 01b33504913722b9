use gridscan_core::{prelude::*, ConfigurationError};

use super::base::kernel_source;
use crate::axis::{coords_expansion, Rank};

/// Swaps two axes of a tensor: `out[c] = x[swap(c)]`.
///
/// Used to bring a scanned axis to the innermost position, and back once scanned.
#[derive(Debug)]
pub struct PermuteKernel {
    inputs: Vec<KernelInput>,
    output_shape: Shape,
    rank: Rank,
    axes: (usize, usize),
}

impl PermuteKernel {
    /// Create the permutation of the axes `a` and `b` over tensors of the given shape.
    pub fn new(shape: &Shape, a: usize, b: usize) -> Result<Self, ConfigurationError> {
        let rank = Rank::new(shape.rank())?;
        if let Some(axis) = [a, b].into_iter().find(|axis| *axis >= shape.rank()) {
            return Err(ConfigurationError::AxisOutOfBounds {
                axis,
                rank: shape.rank(),
            });
        }
        shape.validate()?;

        Ok(Self {
            inputs: vec![KernelInput::new("x", shape.clone())],
            output_shape: shape.swapped(a, b),
            rank,
            axes: (a, b),
        })
    }
}

impl KernelMetadata for PermuteKernel {
    fn id(&self) -> KernelId {
        KernelId::new::<Self>().info((self.inputs[0].shape.dims(), self.axes))
    }

    fn output_dims(&self) -> &[usize] {
        self.output_shape.dims()
    }
}

impl Kernel for PermuteKernel {
    fn inputs(&self) -> &[KernelInput] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    fn source(&self) -> String {
        let body = format!(
            "let coords: {ty} = output_coords();
write_output(read_x({coords}));",
            ty = self.rank.coords_type(),
            coords = coords_expansion(self.rank, "coords", Some(self.axes)),
        );

        kernel_source(None, &body)
    }

    fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32 {
        let (a, b) = self.axes;
        inputs[0].read(&coordinate.swapped(a, b))
    }
}
