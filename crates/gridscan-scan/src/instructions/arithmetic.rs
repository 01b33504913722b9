use super::ScanInstruction;

/// Running sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl ScanInstruction for Add {
    fn name(&self) -> &str {
        "scan_add"
    }

    fn apply(&self, lhs: f32, rhs: f32) -> f32 {
        lhs + rhs
    }

    fn identity(&self) -> f32 {
        0.0
    }

    fn expression(&self) -> String {
        "a + b".to_string()
    }
}

/// Running product.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mul;

impl ScanInstruction for Mul {
    fn name(&self) -> &str {
        "scan_mul"
    }

    fn apply(&self, lhs: f32, rhs: f32) -> f32 {
        lhs * rhs
    }

    fn identity(&self) -> f32 {
        1.0
    }

    fn expression(&self) -> String {
        "a * b".to_string()
    }
}
