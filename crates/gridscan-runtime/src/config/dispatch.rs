use super::logger::{LogLevel, LoggerConfig};

/// Configuration for the logging of kernel dispatches.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DispatchConfig {
    /// Logger configuration for dispatches.
    #[serde(default)]
    pub logger: LoggerConfig<DispatchLogLevel>,
}

/// Verbosity of the dispatch logger.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DispatchLogLevel {
    /// Dispatches are not logged.
    #[default]
    #[serde(rename = "disabled")]
    Disabled,
    /// One line per dispatch with the kernel id.
    #[serde(rename = "basic")]
    Basic,
    /// Adds the host-side execution time and the full kernel type name.
    #[serde(rename = "full")]
    Full,
}

impl LogLevel for DispatchLogLevel {}
