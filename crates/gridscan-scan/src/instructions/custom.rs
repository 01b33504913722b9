use std::sync::Arc;

use super::ScanInstruction;

type BinaryFn = Arc<dyn Fn(f32, f32) -> f32 + Send + Sync>;

/// A user provided operation: a host closure along with its source expression.
///
/// The expression refers to the operands as `a` and `b`, and must compute the same value as
/// the closure. The operation must be associative.
#[derive(Clone)]
pub struct Custom {
    name: String,
    expression: String,
    identity: f32,
    func: BinaryFn,
}

impl Custom {
    /// Create a new custom operation.
    pub fn new(
        name: impl Into<String>,
        expression: impl Into<String>,
        identity: f32,
        func: impl Fn(f32, f32) -> f32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            identity,
            func: Arc::new(func),
        }
    }
}

impl core::fmt::Debug for Custom {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .field("expression", &self.expression)
            .field("identity", &self.identity)
            .finish()
    }
}

impl ScanInstruction for Custom {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, lhs: f32, rhs: f32) -> f32 {
        (self.func)(lhs, rhs)
    }

    fn identity(&self) -> f32 {
        self.identity
    }

    fn expression(&self) -> String {
        self.expression.clone()
    }
}
