//! Rounding at a decimal precision
//!
//! The scale-round-descale sequence: multiply by 10^precision through the
//! decimal-exact multiplier (so `1.005 * 100` becomes `100.5`, not
//! `100.4999…`), apply the rounding primitive, divide back.

use crate::arith::{multiply, MathError, MathResult};
use crate::scale::{scale_factor, Scale, MAX_SCALE};

fn at_precision(x: f64, precision: Scale, op: fn(f64) -> f64) -> MathResult<f64> {
    if precision > MAX_SCALE {
        return Err(MathError::UnsupportedPrecision(precision));
    }
    let factor = scale_factor(precision);
    let scaled = multiply(x, factor)?;
    Ok(op(scaled) / factor)
}

/// Round half away from zero at `precision` decimal places.
///
/// ```
/// use dcalc_math::round;
/// assert_eq!(round(1.005, 2).unwrap(), 1.01);
/// ```
pub fn round(x: f64, precision: Scale) -> MathResult<f64> {
    at_precision(x, precision, f64::round)
}

/// Round toward positive infinity at `precision` decimal places.
pub fn ceil(x: f64, precision: Scale) -> MathResult<f64> {
    at_precision(x, precision, f64::ceil)
}

/// Round toward negative infinity at `precision` decimal places.
pub fn floor(x: f64, precision: Scale) -> MathResult<f64> {
    at_precision(x, precision, f64::floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round() {
        assert_eq!(round(1.2345, 2).unwrap(), 1.23);
        assert_eq!(round(1.2355, 3).unwrap(), 1.236);
        assert_eq!(round(0.105, 2).unwrap(), 0.11);
        assert_eq!(round(-1.2345, 2).unwrap(), -1.23);
        assert_eq!(round(7.0, 0).unwrap(), 7.0);
    }

    #[test]
    fn test_round_half_cases() {
        // The decimal-exact scaling step is what keeps these from falling
        // into the usual 1.004999… trap.
        assert_eq!(round(1.005, 2).unwrap(), 1.01);
        assert_eq!(round(2.675, 2).unwrap(), 2.68);
    }

    #[test]
    fn test_ceil() {
        assert_eq!(ceil(1.231, 2).unwrap(), 1.24);
        assert_eq!(ceil(1.2, 2).unwrap(), 1.2);
        assert_eq!(ceil(-1.231, 2).unwrap(), -1.23);
    }

    #[test]
    fn test_floor() {
        assert_eq!(floor(1.239, 2).unwrap(), 1.23);
        assert_eq!(floor(-1.231, 2).unwrap(), -1.24);
        assert_eq!(floor(5.0, 1).unwrap(), 5.0);
    }

    #[test]
    fn test_precision_limit() {
        assert_eq!(
            round(1.0, MAX_SCALE + 1),
            Err(MathError::UnsupportedPrecision(MAX_SCALE + 1))
        );
        assert!(round(1.0, MAX_SCALE).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(round(f64::NAN, 2), Err(MathError::InvalidInput(_))));
    }
}
