use std::sync::Arc;

use super::{
    compilation::{CompilationConfig, CompilationLogLevel},
    dispatch::{DispatchConfig, DispatchLogLevel},
    scan::ScanSettings,
};

/// Static mutex holding the global configuration, initialized as `None`.
static GRIDSCAN_GLOBAL_CONFIG: spin::Mutex<Option<Arc<GlobalConfig>>> = spin::Mutex::new(None);

/// Represents the global configuration for gridscan, combining logging and strategy settings.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GlobalConfig {
    /// Configuration for the logging of emitted kernels.
    #[serde(default)]
    pub compilation: CompilationConfig,

    /// Configuration for the logging of dispatches.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Configuration of the scan strategy selection.
    #[serde(default)]
    pub scan: ScanSettings,
}

impl GlobalConfig {
    /// Retrieves the current global configuration, loading it from the current directory if not set.
    ///
    /// If no configuration is set, it attempts to load one from `gridscan.toml` or `GridScan.toml`
    /// in the current directory or its parents. If no file is found, a default configuration is
    /// used.
    ///
    /// # Notes
    ///
    /// Calling this function goes through a global lock; read it once per operation.
    pub fn get() -> Arc<Self> {
        let mut state = GRIDSCAN_GLOBAL_CONFIG.lock();
        match state.as_ref() {
            Some(config) => config.clone(),
            None => {
                let config = Arc::new(Self::from_current_dir().override_from_env());
                *state = Some(config.clone());
                config
            }
        }
    }

    /// Save the default configuration to the provided file path.
    pub fn save_default<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<()> {
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        std::fs::write(path, content)
    }

    /// Sets the global configuration to the provided value.
    ///
    /// # Panics
    /// Panics if the configuration has already been set or read, as it cannot be overridden.
    ///
    /// # Warning
    /// This method must be called at the start of the program, before any calls to `get`.
    pub fn set(config: Self) {
        let mut state = GRIDSCAN_GLOBAL_CONFIG.lock();
        if state.is_some() {
            panic!("Cannot set the global configuration multiple times.");
        }
        *state = Some(Arc::new(config));
    }

    /// Overrides configuration fields based on environment variables.
    pub fn override_from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("GRIDSCAN_DEBUG_LOG") {
            self.compilation.logger.level = CompilationLogLevel::Full;
            self.dispatch.logger.level = DispatchLogLevel::Full;

            match val.as_str() {
                "stdout" => {
                    self.compilation.logger.stdout = true;
                    self.dispatch.logger.stdout = true;
                }
                "stderr" => {
                    self.compilation.logger.stderr = true;
                    self.dispatch.logger.stderr = true;
                }
                "1" | "true" => {
                    let file_path = "/tmp/gridscan.log";
                    self.compilation.logger.file = Some(file_path.into());
                    self.dispatch.logger.file = Some(file_path.into());
                }
                "0" | "false" => {
                    self.compilation.logger.level = CompilationLogLevel::Disabled;
                    self.dispatch.logger.level = DispatchLogLevel::Disabled;
                }
                file_path => {
                    self.compilation.logger.file = Some(file_path.into());
                    self.dispatch.logger.file = Some(file_path.into());
                }
            }
        };

        if let Ok(val) = std::env::var("GRIDSCAN_SCAN_THRESHOLD") {
            match val.parse::<usize>() {
                Ok(threshold) => self.scan.sequential_threshold = threshold,
                Err(err) => log::warn!("Ignoring GRIDSCAN_SCAN_THRESHOLD={val}: {err}"),
            }
        }

        self
    }

    // Loads configuration from `gridscan.toml` or `GridScan.toml` in the current directory or its
    // parents.
    fn from_current_dir() -> Self {
        let Ok(mut dir) = std::env::current_dir() else {
            return Self::default();
        };

        loop {
            if let Ok(content) = Self::from_file_path(dir.join("gridscan.toml")) {
                return content;
            }

            if let Ok(content) = Self::from_file_path(dir.join("GridScan.toml")) {
                return content;
            }

            if !dir.pop() {
                break;
            }
        }

        Self::default()
    }

    /// Loads configuration from a specified file path.
    ///
    /// # Panics
    /// Panics if the file exists but isn't a valid configuration.
    pub fn from_file_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = match toml::from_str(&content) {
            Ok(val) => val,
            Err(err) => panic!("The file provided doesn't have the right format => {err:?}"),
        };

        Ok(config)
    }
}
