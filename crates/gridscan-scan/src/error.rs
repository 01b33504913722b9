use gridscan_core::{
    server::{IoError, LaunchError},
    ConfigurationError,
};
use thiserror::Error;

/// Errors of a scan, surfaced to its caller before or while dispatching.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    /// The scan can't be built for this shape and axis.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The input doesn't have the shape the scan was described for.
    #[error("Input tensor has shape {actual:?}, the scan was described for {expected:?}")]
    ShapeMismatch {
        /// Shape of the descriptor.
        expected: Vec<usize>,
        /// Shape of the input.
        actual: Vec<usize>,
    },

    /// A dispatch was rejected by the runtime.
    #[error("Failed to launch a scan kernel: {0}")]
    Launch(#[from] LaunchError),

    /// Moving data from or to the runtime failed.
    #[error("Failed to access scan data: {0}")]
    Io(#[from] IoError),
}
