pub mod simple;

pub use gridscan_core::Runtime;

#[allow(missing_docs)]
#[macro_export]
macro_rules! testgen_scan {
    () => {
        mod test_scan {
            use super::*;

            gridscan_scan::testgen_scan_simple!();
            gridscan_scan::testgen_scan_axes!();
            gridscan_scan::testgen_scan_cases!();
        }
    };
}

/// Asserts that two slices are equal within a relative tolerance.
pub fn assert_approx_eq(expected: &[f32], actual: &[f32], tolerance: f32) {
    pretty_assertions::assert_eq!(expected.len(), actual.len(), "Lengths differ");

    for (index, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        let scale = e.abs().max(a.abs()).max(1.0);
        assert!(
            (e - a).abs() <= tolerance * scale,
            "Values differ at index {index}: expected {e}, got {a}\nexpected: {expected:?}\nactual: {actual:?}"
        );
    }
}
