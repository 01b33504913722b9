use thiserror::Error;

/// Errors raised while building a kernel, before anything is dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Only ranks 1 through 4 are supported.
    #[error("Rank {rank} is not supported, expected a rank between 1 and 4")]
    UnsupportedRank {
        /// The rejected rank.
        rank: usize,
    },

    /// The axis doesn't exist in the shape.
    #[error("Can't use axis {axis} of a {rank}-dimensional tensor")]
    AxisOutOfBounds {
        /// The rejected axis.
        axis: usize,
        /// The rank of the shape.
        rank: usize,
    },

    /// The axis isn't the one indexed for this rank.
    #[error("Axis {axis} isn't indexable on a {rank}-dimensional tensor, expected axis {expected}")]
    AxisConvention {
        /// The rejected axis.
        axis: usize,
        /// The rank of the shape.
        rank: usize,
        /// The only axis indexed for this rank.
        expected: usize,
    },

    /// The scanned axis has no element.
    #[error("Can't scan along axis {axis}: it has length 0")]
    EmptyAxis {
        /// The empty axis.
        axis: usize,
    },

    /// A dimension other than the scanned axis has no element.
    #[error("Dimension {dim} has length 0")]
    ZeroDimension {
        /// The empty dimension.
        dim: usize,
    },

    /// An axis too short to be contracted pairwise.
    #[error("Can't contract axis {axis} of length {length}, at least 2 elements are required")]
    ContractTooShort {
        /// The contracted axis.
        axis: usize,
        /// Its length.
        length: usize,
    },

    /// A merge can only rebuild an axis of even length.
    #[error("Can't merge axis {axis} of odd length {length}")]
    OddMerge {
        /// The merged axis.
        axis: usize,
        /// Its length.
        length: usize,
    },

    /// The shapes given to a merge don't have the same rank.
    #[error("Tensors must be of the same rank, got {original} and {contracted}")]
    RankMismatch {
        /// Rank of the original shape.
        original: usize,
        /// Rank of the contracted shape.
        contracted: usize,
    },

    /// The contracted axis isn't half the original one.
    #[error("Size of contracted dim must be half size of input dim, got {original} and {contracted}")]
    ContractedLength {
        /// Length of the original axis.
        original: usize,
        /// Length of the contracted axis.
        contracted: usize,
    },

    /// Two shapes differ on a dimension that must be shared.
    #[error("Dimension {dim} differs between shapes: {lhs} and {rhs}")]
    DimensionMismatch {
        /// The differing dimension.
        dim: usize,
        /// Its length on the first shape.
        lhs: usize,
        /// Its length on the second shape.
        rhs: usize,
    },

    /// Host data doesn't fill the shape.
    #[error("Shape {shape} holds {expected} elements, got {actual}")]
    DataLength {
        /// The shape, displayed.
        shape: String,
        /// Number of elements of the shape.
        expected: usize,
        /// Number of elements provided.
        actual: usize,
    },
}
