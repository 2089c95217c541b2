//! Decimal-safe arithmetic primitives for dcalc
//!
//! This crate provides the scaled-integer arithmetic core: operands are
//! lifted to integers by a power of ten derived from their decimal scale,
//! combined with integer arithmetic, and divided back. For operands whose
//! scaled form stays inside the `f64` exact-integer window this eliminates
//! binary rounding artifacts such as `0.1 + 0.2 != 0.3`.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod arith;
pub mod round;
pub mod scale;

// Re-export main types
pub use arith::{add, divide, multiply, subtract, MathError, MathResult};
pub use round::{ceil, floor, round};
pub use scale::{
    decimal_places, scale_factor, set_boundary_warnings, strip, to_scaled, Scale,
    EXACT_INT_BOUND, MAX_SCALE,
};
