//! Scaled-integer arithmetic
//!
//! Each operation derives the decimal scale of its operands, lifts them to
//! i128 integers by the matching power of ten, combines the integers, and
//! divides back. Inside the exact-integer window this makes add, subtract
//! and multiply decimal-exact; divide aligns the operands to a common scale
//! but returns the native quotient of the scaled integers without
//! re-rounding, a deliberately weaker contract.

use thiserror::Error;

use crate::scale::{decimal_places, scale_factor, to_scaled, MAX_SCALE};

/// Errors that can occur during arithmetic operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Divisor was exactly zero
    #[error("division by zero")]
    DivisionByZero,
    /// Operand was NaN or infinite
    #[error("invalid numeric input: {0}")]
    InvalidInput(f64),
    /// Requested precision exceeds what an f64 can carry
    #[error("unsupported precision {0}, maximum is {MAX_SCALE}")]
    UnsupportedPrecision(u32),
}

/// Result type for arithmetic operations
pub type MathResult<T> = Result<T, MathError>;

fn ensure_finite(x: f64) -> MathResult<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(MathError::InvalidInput(x))
    }
}

/// Decimal-exact addition.
///
/// ```
/// use dcalc_math::add;
/// assert_eq!(add(0.1, 0.2).unwrap(), 0.3);
/// ```
pub fn add(a: f64, b: f64) -> MathResult<f64> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    let factor = scale_factor(decimal_places(a).max(decimal_places(b)));
    let sum = to_scaled(a, factor) + to_scaled(b, factor);
    Ok(sum as f64 / factor)
}

/// Decimal-exact subtraction.
pub fn subtract(a: f64, b: f64) -> MathResult<f64> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    let factor = scale_factor(decimal_places(a).max(decimal_places(b)));
    let difference = to_scaled(a, factor) - to_scaled(b, factor);
    Ok(difference as f64 / factor)
}

/// Decimal-exact multiplication.
///
/// Operand scales are derived independently; the i128 product is divided by
/// 10^(scale_a + scale_b).
pub fn multiply(a: f64, b: f64) -> MathResult<f64> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    let scale_a = decimal_places(a);
    let scale_b = decimal_places(b);
    let product = to_scaled(a, scale_factor(scale_a)) * to_scaled(b, scale_factor(scale_b));
    Ok(product as f64 / scale_factor(scale_a + scale_b))
}

/// Scale-aligned division.
///
/// Both operands are lifted to the common scale so the factors cancel, then
/// the scaled integers are divided natively. The quotient is not re-rounded
/// to any fixed precision; apply [`crate::round`] when a bounded number of
/// decimals is required.
///
/// # Errors
/// [`MathError::DivisionByZero`] when `b` is zero.
pub fn divide(a: f64, b: f64) -> MathResult<f64> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    if b == 0.0 {
        return Err(MathError::DivisionByZero);
    }
    let factor = scale_factor(decimal_places(a).max(decimal_places(b)));
    let numerator = to_scaled(a, factor);
    let denominator = to_scaled(b, factor);
    Ok(numerator as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_repairs_binary_artifacts() {
        assert_eq!(add(0.1, 0.2).unwrap(), 0.3);
        assert_eq!(add(0.7, 0.1).unwrap(), 0.8);
        assert_eq!(add(1.1, 2.2).unwrap(), 3.3);
    }

    #[test]
    fn test_add_commutes() {
        assert_eq!(add(0.1, 0.2).unwrap(), add(0.2, 0.1).unwrap());
        assert_eq!(add(-1.5, 3.25).unwrap(), add(3.25, -1.5).unwrap());
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(0.3, 0.1).unwrap(), 0.2);
        assert_eq!(subtract(1.5, 1.2).unwrap(), 0.3);
        assert_eq!(subtract(0.1, 0.3).unwrap(), -0.2);
    }

    #[test]
    fn test_subtract_inverts_add() {
        let sum = add(1.15, 2.05).unwrap();
        assert_eq!(subtract(sum, 2.05).unwrap(), 1.15);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(0.1, 3.0).unwrap(), 0.3);
        assert_eq!(multiply(0.7, 100.0).unwrap(), 70.0);
        assert_eq!(multiply(1.5, -1.5).unwrap(), -2.25);
        assert_eq!(multiply(0.0, 123.456).unwrap(), 0.0);
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(0.3, 0.1).unwrap(), 3.0);
        assert_eq!(divide(1.21, 1.1).unwrap(), 1.1);
        assert_eq!(divide(-0.6, 0.2).unwrap(), -3.0);
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(5.0, 0.0), Err(MathError::DivisionByZero));
        assert_eq!(divide(0.0, 0.0), Err(MathError::DivisionByZero));
        assert_eq!(divide(-3.25, 0.0), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_divide_is_native_quotient() {
        // The quotient contract is weaker than the other operators: the
        // scaled integers divide natively, so a non-terminating decimal
        // keeps its binary representation.
        assert_eq!(divide(1.0, 3.0).unwrap(), 1.0f64 / 3.0f64);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(matches!(add(f64::NAN, 1.0), Err(MathError::InvalidInput(_))));
        assert!(matches!(
            subtract(1.0, f64::INFINITY),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            multiply(f64::NEG_INFINITY, 2.0),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(divide(f64::NAN, 1.0), Err(MathError::InvalidInput(_))));
    }
}
