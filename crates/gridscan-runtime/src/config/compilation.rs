use super::logger::{BinaryLogLevel, LoggerConfig};

/// Configuration for the logging of emitted kernel sources.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CompilationConfig {
    /// Logger configuration for compiled kernels.
    #[serde(default)]
    pub logger: LoggerConfig<CompilationLogLevel>,
}

/// Log level for compilation: either every emitted kernel is logged or none is.
pub type CompilationLogLevel = BinaryLogLevel;
