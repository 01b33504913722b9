use gridscan_core::config::{scan::DEFAULT_SEQUENTIAL_THRESHOLD, GlobalConfig};
use serde::{Deserialize, Serialize};

/// How a scan level is dispatched.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ScanState {
    /// One sequential dispatch over the whole axis.
    Direct,
    /// Contract the axis, scan the contraction, then merge.
    Recurse,
}

/// Selects, per scan level, between a direct sequential scan and the contract/merge recursion.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct ScanStrategy {
    /// Axis lengths strictly below this value are scanned sequentially.
    ///
    /// Odd lengths and lengths below 2 are always scanned sequentially.
    pub sequential_threshold: usize,
}

impl Default for ScanStrategy {
    fn default() -> Self {
        Self {
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
        }
    }
}

impl ScanStrategy {
    /// The strategy set in the [global configuration](GlobalConfig).
    pub fn from_config() -> Self {
        Self {
            sequential_threshold: GlobalConfig::get().scan.sequential_threshold,
        }
    }

    /// Always scan with a single sequential dispatch.
    pub fn sequential() -> Self {
        Self {
            sequential_threshold: usize::MAX,
        }
    }

    /// Contract every even axis, down to odd or unit lengths.
    pub fn tree() -> Self {
        Self {
            sequential_threshold: 0,
        }
    }

    /// The state of a level scanning an axis of length `len`.
    pub fn select(&self, len: usize) -> ScanState {
        if len < 2 || len % 2 != 0 || len < self.sequential_threshold {
            ScanState::Direct
        } else {
            ScanState::Recurse
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_and_short_axes_are_direct() {
        let tree = ScanStrategy::tree();

        assert_eq!(tree.select(1), ScanState::Direct);
        assert_eq!(tree.select(17), ScanState::Direct);
        assert_eq!(tree.select(2), ScanState::Recurse);
        assert_eq!(tree.select(1024), ScanState::Recurse);
    }

    #[test]
    fn threshold_bounds_recursion() {
        let strategy = ScanStrategy {
            sequential_threshold: 64,
        };

        assert_eq!(strategy.select(32), ScanState::Direct);
        assert_eq!(strategy.select(64), ScanState::Recurse);
        assert_eq!(ScanStrategy::sequential().select(1 << 20), ScanState::Direct);
    }
}
