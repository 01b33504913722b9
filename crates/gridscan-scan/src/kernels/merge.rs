use gridscan_core::{prelude::*, ConfigurationError};

use super::base::{kernel_source, scan_indexer, Instruction};
use crate::axis::AxisIndexer;

/// Rebuilds the exclusive scan of a tensor from the exclusive scan of its contraction.
///
/// For an output position `i` along the axis, `r[i / 2]` already folds every pair before it.
/// Even positions take it as is, odd positions still combine the preceding element of `x`.
#[derive(Debug)]
pub struct MergeKernel {
    inputs: Vec<KernelInput>,
    output_shape: Shape,
    indexer: AxisIndexer,
    instruction: Instruction,
}

impl MergeKernel {
    /// Create the merge of `axis`, from a tensor of shape `original` and the scan of its
    /// contraction of shape `contracted`.
    pub fn new(
        original: &Shape,
        contracted: &Shape,
        axis: usize,
        instruction: Instruction,
    ) -> Result<Self, ConfigurationError> {
        if original.rank() != contracted.rank() {
            return Err(ConfigurationError::RankMismatch {
                original: original.rank(),
                contracted: contracted.rank(),
            });
        }
        let indexer = scan_indexer(original, axis)?;
        if original[axis] / 2 != contracted[axis] {
            return Err(ConfigurationError::ContractedLength {
                original: original[axis],
                contracted: contracted[axis],
            });
        }
        if original[axis] % 2 != 0 {
            return Err(ConfigurationError::OddMerge {
                axis,
                length: original[axis],
            });
        }
        let mismatch = (0..original.rank())
            .find(|dim| *dim != axis && original[*dim] != contracted[*dim]);
        if let Some(dim) = mismatch {
            return Err(ConfigurationError::DimensionMismatch {
                dim,
                lhs: original[dim],
                rhs: contracted[dim],
            });
        }

        Ok(Self {
            inputs: vec![
                KernelInput::new("x", original.clone()),
                KernelInput::new("r", contracted.clone()),
            ],
            output_shape: original.clone(),
            indexer,
            instruction,
        })
    }
}

impl KernelMetadata for MergeKernel {
    fn id(&self) -> KernelId {
        KernelId::new::<Self>().info((
            self.output_shape.dims(),
            self.indexer.axis(),
            self.instruction.expression(),
        ))
    }

    fn output_dims(&self) -> &[usize] {
        self.output_shape.dims()
    }
}

impl Kernel for MergeKernel {
    fn inputs(&self) -> &[KernelInput] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    fn source(&self) -> String {
        let body = format!(
            "var coords_x: {ty} = output_coords();
var coords_r: {ty} = output_coords();
{axis_r} = {axis_r} / 2;
if ({axis_x} % 2 == 0) {{
    write_output(read_r({r}));
}} else {{
    {axis_x} = {axis_x} - 1;
    write_output({op}(read_r({r}), read_x({x})));
}}",
            ty = self.indexer.coords_type(),
            axis_x = self.indexer.axis_component("coords_x"),
            axis_r = self.indexer.axis_component("coords_r"),
            x = self.indexer.coords("coords_x"),
            r = self.indexer.coords("coords_r"),
            op = self.instruction.name(),
        );

        kernel_source(Some(&self.instruction.definition()), &body)
    }

    fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32 {
        let position = self.indexer.get(coordinate);
        let reduced = inputs[1].read(&self.indexer.with(coordinate, position / 2));

        if position % 2 == 0 {
            reduced
        } else {
            let previous = inputs[0].read(&self.indexer.with(coordinate, position - 1));
            self.instruction.apply(reduced, previous)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::instructions::Add;
    use pretty_assertions::assert_eq;

    #[test]
    fn rebuilds_the_exclusive_scan() {
        let original = Shape::new([6]);
        let contracted = Shape::new([3]);
        let kernel = MergeKernel::new(&original, &contracted, 0, Arc::new(Add)).unwrap();

        let x = [1., 2., 3., 4., 5., 6.];
        // Exclusive scan of the pair sums [3, 7, 11].
        let r = [0., 3., 10.];
        let inputs = Inputs::new(vec![
            TensorView::new(&original, &x),
            TensorView::new(&contracted, &r),
        ]);

        let output = (0..6)
            .map(|offset| kernel.compute(&original.coordinate(offset), &inputs))
            .collect::<Vec<_>>();

        assert_eq!(output, vec![0., 1., 3., 6., 10., 15.]);
    }

    #[test]
    fn construction_checks_the_shapes() {
        let add: Instruction = Arc::new(Add);

        assert_eq!(
            MergeKernel::new(&Shape::new([2, 8]), &Shape::new([4]), 1, add.clone()).unwrap_err(),
            ConfigurationError::RankMismatch {
                original: 2,
                contracted: 1
            }
        );
        assert_eq!(
            MergeKernel::new(&Shape::new([2, 8]), &Shape::new([2, 3]), 1, add.clone())
                .unwrap_err(),
            ConfigurationError::ContractedLength {
                original: 8,
                contracted: 3
            }
        );
        assert_eq!(
            MergeKernel::new(&Shape::new([2, 8]), &Shape::new([3, 4]), 1, add.clone())
                .unwrap_err(),
            ConfigurationError::DimensionMismatch {
                dim: 0,
                lhs: 2,
                rhs: 3
            }
        );
        assert_eq!(
            MergeKernel::new(&Shape::new([7]), &Shape::new([3]), 0, add).unwrap_err(),
            ConfigurationError::OddMerge { axis: 0, length: 7 }
        );
    }

    #[test]
    fn source_branches_on_parity() {
        let kernel =
            MergeKernel::new(&Shape::new([2, 4]), &Shape::new([2, 2]), 1, Arc::new(Add)).unwrap();
        let source = kernel.source();

        assert!(source.contains("coords_r.y = coords_r.y / 2;"));
        assert!(source.contains("if (coords_x.y % 2 == 0) {"));
        assert!(source.contains(
            "write_output(scan_add(read_r(coords_r.x, coords_r.y), read_x(coords_x.x, coords_x.y)));"
        ));
    }
}
