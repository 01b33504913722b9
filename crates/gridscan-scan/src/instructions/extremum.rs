use super::ScanInstruction;

/// Running maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl ScanInstruction for Max {
    fn name(&self) -> &str {
        "scan_max"
    }

    fn apply(&self, lhs: f32, rhs: f32) -> f32 {
        lhs.max(rhs)
    }

    fn identity(&self) -> f32 {
        f32::NEG_INFINITY
    }

    fn expression(&self) -> String {
        "max(a, b)".to_string()
    }
}

/// Running minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl ScanInstruction for Min {
    fn name(&self) -> &str {
        "scan_min"
    }

    fn apply(&self, lhs: f32, rhs: f32) -> f32 {
        lhs.min(rhs)
    }

    fn identity(&self) -> f32 {
        f32::INFINITY
    }

    fn expression(&self) -> String {
        "min(a, b)".to_string()
    }
}
