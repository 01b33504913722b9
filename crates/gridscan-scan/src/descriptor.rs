use std::sync::Arc;

use gridscan_core::{ConfigurationError, Shape, MAX_RANK};

use crate::{instructions::ScanInstruction, kernels::Instruction};

/// Everything a scan is built from: the input shape, the axis, the operation and whether the
/// scan is inclusive.
#[derive(Debug, Clone)]
pub struct ScanDescriptor {
    /// Shape of the scanned tensor.
    pub shape: Shape,
    /// The scanned axis.
    pub axis: usize,
    /// The operation, with its identity and source text.
    pub instruction: Instruction,
    /// Whether each output includes the element at its own position.
    pub inclusive: bool,
}

impl ScanDescriptor {
    /// Describe a scan, failing when it can't be dispatched.
    pub fn new<I: ScanInstruction>(
        shape: impl Into<Shape>,
        axis: usize,
        instruction: I,
        inclusive: bool,
    ) -> Result<Self, ConfigurationError> {
        Self::from_shared(shape.into(), axis, Arc::new(instruction), inclusive)
    }

    /// Describe a scan with an instruction already shared.
    pub fn from_shared(
        shape: Shape,
        axis: usize,
        instruction: Instruction,
        inclusive: bool,
    ) -> Result<Self, ConfigurationError> {
        let rank = shape.rank();
        if rank == 0 || rank > MAX_RANK {
            return Err(ConfigurationError::UnsupportedRank { rank });
        }
        if axis >= rank {
            return Err(ConfigurationError::AxisOutOfBounds { axis, rank });
        }
        if shape[axis] == 0 {
            return Err(ConfigurationError::EmptyAxis { axis });
        }
        shape.validate()?;

        Ok(Self {
            shape,
            axis,
            instruction,
            inclusive,
        })
    }

    /// The length of the scanned axis.
    pub fn axis_len(&self) -> usize {
        self.shape[self.axis]
    }

    /// The source text of the operation.
    pub fn definition(&self) -> String {
        self.instruction.definition()
    }

    /// The identity of the operation.
    pub fn identity(&self) -> f32 {
        self.instruction.identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Add;

    #[test]
    fn invalid_scans_fail_before_dispatch() {
        let cases = [
            (Shape::new(Vec::new()), 0, ConfigurationError::UnsupportedRank { rank: 0 }),
            (Shape::new([1, 2, 3, 4, 5]), 0, ConfigurationError::UnsupportedRank { rank: 5 }),
            (Shape::new([4, 4]), 2, ConfigurationError::AxisOutOfBounds { axis: 2, rank: 2 }),
            (Shape::new([4, 0]), 1, ConfigurationError::EmptyAxis { axis: 1 }),
            (Shape::new([0, 4]), 1, ConfigurationError::ZeroDimension { dim: 0 }),
        ];

        for (shape, axis, expected) in cases {
            assert_eq!(
                ScanDescriptor::new(shape, axis, Add, false).unwrap_err(),
                expected
            );
        }
    }

    #[test]
    fn any_axis_can_be_described() {
        let descriptor = ScanDescriptor::new([3, 5, 7], 0, Add, true).unwrap();

        assert_eq!(descriptor.axis_len(), 3);
        assert_eq!(descriptor.identity(), 0.0);
        assert!(descriptor.definition().contains("a + b"));
    }
}
