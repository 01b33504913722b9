use gridscan_core::{prelude::*, ConfigurationError};

use super::base::{kernel_source, scan_indexer, Instruction};
use crate::axis::AxisIndexer;

/// Combines adjacent pairs along the axis, halving its length.
///
/// Output `j` is `op(x[2j], x[2j + 1])`; an odd trailing element is dropped.
#[derive(Debug)]
pub struct ContractKernel {
    inputs: Vec<KernelInput>,
    output_shape: Shape,
    indexer: AxisIndexer,
    instruction: Instruction,
}

impl ContractKernel {
    /// Create the contraction of `axis` over tensors of the given shape.
    pub fn new(
        shape: &Shape,
        axis: usize,
        instruction: Instruction,
    ) -> Result<Self, ConfigurationError> {
        let indexer = scan_indexer(shape, axis)?;
        if shape[axis] < 2 {
            return Err(ConfigurationError::ContractTooShort {
                axis,
                length: shape[axis],
            });
        }

        Ok(Self {
            inputs: vec![KernelInput::new("x", shape.clone())],
            output_shape: contracted_shape(shape, axis),
            indexer,
            instruction,
        })
    }
}

/// The shape of a tensor contracted along `axis`.
pub fn contracted_shape(shape: &Shape, axis: usize) -> Shape {
    shape.with_dim(axis, shape[axis] / 2)
}

impl KernelMetadata for ContractKernel {
    fn id(&self) -> KernelId {
        KernelId::new::<Self>().info((
            self.inputs[0].shape.dims(),
            self.indexer.axis(),
            self.instruction.expression(),
        ))
    }

    fn output_dims(&self) -> &[usize] {
        self.output_shape.dims()
    }
}

impl Kernel for ContractKernel {
    fn inputs(&self) -> &[KernelInput] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    fn source(&self) -> String {
        let body = format!(
            "var coords: {ty} = output_coords();
{axis} = {axis} * 2;
let lhs = read_x({coords});
{axis} = {axis} + 1;
let rhs = read_x({coords});
write_output({op}(lhs, rhs));",
            ty = self.indexer.coords_type(),
            axis = self.indexer.axis_component("coords"),
            coords = self.indexer.coords("coords"),
            op = self.instruction.name(),
        );

        kernel_source(Some(&self.instruction.definition()), &body)
    }

    fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32 {
        let position = self.indexer.get(coordinate) * 2;
        let lhs = inputs[0].read(&self.indexer.with(coordinate, position));
        let rhs = inputs[0].read(&self.indexer.with(coordinate, position + 1));

        self.instruction.apply(lhs, rhs)
    }
}
