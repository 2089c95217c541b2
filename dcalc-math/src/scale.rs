//! Decimal-scale inspection
//!
//! The scale of a number is the count of base-10 fractional digits in its
//! canonical decimal string. Rust's `Display` for `f64` always produces the
//! shortest round-tripping decimal form and never falls back to exponential
//! notation, so the string inspection here is total over all finite inputs.

use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;

/// Number of base-10 fractional digits in a canonical decimal string
pub type Scale = u32;

/// Largest decimal scale the arithmetic layer will derive or accept.
///
/// An `f64` carries at most 17 significant decimal digits; scales beyond 15
/// cannot be combined without leaving the exact-integer window below.
pub const MAX_SCALE: Scale = 15;

/// Upper bound of the `f64` exact-integer window (2^53).
///
/// Scaled operands whose magnitude stays at or below this bound are
/// represented exactly, which is what makes add/subtract/multiply
/// decimal-exact. Beyond it the operations still return the best available
/// `f64` but a warning is logged.
pub const EXACT_INT_BOUND: f64 = 9_007_199_254_740_992.0;

static BOUNDARY_WARNINGS: AtomicBool = AtomicBool::new(true);

/// Enable or disable the out-of-window warning log.
///
/// Returns the previous setting. The warning is on by default; callers that
/// knowingly operate on large magnitudes can silence it process-wide.
pub fn set_boundary_warnings(enabled: bool) -> bool {
    BOUNDARY_WARNINGS.swap(enabled, Ordering::Relaxed)
}

/// Count the fractional digits of `x` in its canonical decimal form.
///
/// Integers (and non-finite values) report scale 0.
///
/// ```
/// use dcalc_math::decimal_places;
/// assert_eq!(decimal_places(1.25), 2);
/// assert_eq!(decimal_places(-0.001), 3);
/// assert_eq!(decimal_places(42.0), 0);
/// ```
pub fn decimal_places(x: f64) -> Scale {
    if !x.is_finite() {
        return 0;
    }
    let repr = x.to_string();
    match repr.find('.') {
        Some(dot) => (repr.len() - dot - 1) as Scale,
        None => 0,
    }
}

/// The scale factor 10^scale, always a non-negative integer power of ten.
pub fn scale_factor(scale: Scale) -> f64 {
    10f64.powi(scale as i32)
}

/// Lift `x` to its scaled-integer form: round(x * factor) as i128.
///
/// Logs a warning when the scaled value leaves the exact-integer window,
/// since integer exactness (and with it decimal exactness of the surrounding
/// operation) is no longer guaranteed there.
pub fn to_scaled(x: f64, factor: f64) -> i128 {
    let scaled = (x * factor).round();
    if scaled.abs() > EXACT_INT_BOUND && BOUNDARY_WARNINGS.load(Ordering::Relaxed) {
        warn!(
            "scaled value {} exceeds the exact-integer bound; result may lose decimal exactness",
            scaled
        );
    }
    scaled as i128
}

/// Shed accumulated binary noise by re-parsing `x` at 12 significant digits.
///
/// Useful for values produced outside the scaled-integer layer, e.g.
/// `strip(0.1 + 0.2) == 0.3`.
pub fn strip(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{:.11e}", x).parse().unwrap_or(x)
}
