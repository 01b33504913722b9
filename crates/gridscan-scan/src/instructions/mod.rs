mod arithmetic;
mod custom;
mod extremum;

pub use arithmetic::*;
pub use custom::*;
pub use extremum::*;

/// An associative binary operation scanned along an axis.
///
/// The host semantic, its identity and the emitted definition live together so that a kernel
/// never runs one operation while emitting another.
///
/// # Precision
///
/// Operations run on `f32`. Integers and booleans encoded as floats are only exact up to `2^24`.
/// The sequential and tree strategies associate the operation differently, so their results may
/// differ by rounding for non-exact values.
pub trait ScanInstruction: Send + Sync + core::fmt::Debug + 'static {
    /// Name of the function defined in the emitted source.
    fn name(&self) -> &str;

    /// Combine two values, `lhs` coming first along the axis.
    fn apply(&self, lhs: f32, rhs: f32) -> f32;

    /// The value `e` such that `apply(e, x) == x`.
    fn identity(&self) -> f32;

    /// The source expression of the operation over the operands `a` and `b`.
    fn expression(&self) -> String;

    /// The source definition of the operation, emitted ahead of the kernel entry point.
    fn definition(&self) -> String {
        format!(
            "fn {}(a: f32, b: f32) -> f32 {{\n    return {};\n}}",
            self.name(),
            self.expression()
        )
    }
}

/// Format a value as a source literal.
///
/// Non-finite values have no literal form and are emitted as a bitcast of their bits.
pub(crate) fn float_literal(value: f32) -> String {
    if value.is_finite() {
        format!("{value:?}")
    } else {
        format!("bitcast<f32>({:#010x}u)", value.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn definitions_wrap_the_expression() {
        assert_eq!(
            Add.definition(),
            "fn scan_add(a: f32, b: f32) -> f32 {\n    return a + b;\n}"
        );
        assert_eq!(Max.expression(), "max(a, b)");
    }

    #[test]
    fn identities_are_neutral() {
        let instructions: [&dyn ScanInstruction; 4] = [&Add, &Mul, &Max, &Min];

        for instruction in instructions {
            for value in [f32::NEG_INFINITY, -3.5, 0.0, 2.0, 1e6, f32::INFINITY] {
                assert_eq!(instruction.apply(instruction.identity(), value), value);
                assert_eq!(instruction.apply(value, instruction.identity()), value);
            }
        }
    }

    #[test]
    fn literals_are_valid_floats() {
        assert_eq!(float_literal(0.0), "0.0");
        assert_eq!(float_literal(1.0), "1.0");
        assert_eq!(float_literal(-2.5), "-2.5");
        assert_eq!(float_literal(f32::INFINITY), "bitcast<f32>(0x7f800000u)");
        assert_eq!(float_literal(f32::NEG_INFINITY), "bitcast<f32>(0xff800000u)");
    }
}
