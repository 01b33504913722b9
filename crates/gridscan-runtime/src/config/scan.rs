/// Default axis length from which the scan switches to the contract/merge cascade.
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 64;

/// Tunables of the scan strategy selection.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScanSettings {
    /// Axis lengths strictly below this value are scanned with a single sequential dispatch.
    #[serde(default = "sequential_threshold_default")]
    pub sequential_threshold: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
        }
    }
}

fn sequential_threshold_default() -> usize {
    DEFAULT_SEQUENTIAL_THRESHOLD
}
