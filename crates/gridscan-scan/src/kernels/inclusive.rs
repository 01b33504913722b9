use gridscan_core::{prelude::*, ConfigurationError};

use super::base::{kernel_source, Instruction};
use crate::axis::{coords_expansion, Rank};

/// Turns an exclusive scan into an inclusive one: `out[c] = op(r[c], x[c])`.
#[derive(Debug)]
pub struct InclusiveKernel {
    inputs: Vec<KernelInput>,
    rank: Rank,
    instruction: Instruction,
}

impl InclusiveKernel {
    /// Create the kernel over tensors of the given shape.
    pub fn new(shape: &Shape, instruction: Instruction) -> Result<Self, ConfigurationError> {
        let rank = Rank::new(shape.rank())?;
        shape.validate()?;

        Ok(Self {
            inputs: vec![
                KernelInput::new("r", shape.clone()),
                KernelInput::new("x", shape.clone()),
            ],
            rank,
            instruction,
        })
    }
}

impl KernelMetadata for InclusiveKernel {
    fn id(&self) -> KernelId {
        KernelId::new::<Self>().info((self.inputs[0].shape.dims(), self.instruction.expression()))
    }

    fn output_dims(&self) -> &[usize] {
        self.inputs[0].shape.dims()
    }
}

impl Kernel for InclusiveKernel {
    fn inputs(&self) -> &[KernelInput] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.inputs[0].shape
    }

    fn source(&self) -> String {
        let body = format!(
            "let coords: {ty} = output_coords();
write_output({op}(read_r({coords}), read_x({coords})));",
            ty = self.rank.coords_type(),
            op = self.instruction.name(),
            coords = coords_expansion(self.rank, "coords", None),
        );

        kernel_source(Some(&self.instruction.definition()), &body)
    }

    fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32 {
        self.instruction
            .apply(inputs[0].read(coordinate), inputs[1].read(coordinate))
    }
}
