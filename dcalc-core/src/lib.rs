//! Core engine for dcalc
//!
//! This crate provides the user-facing surface over the `dcalc-math`
//! primitives: a small arithmetic-expression evaluator, display formatting
//! (currency, percentage, scientific notation, fractions, readable units),
//! Chinese numeral and RMB capital conversion, layered configuration, and a
//! fluent chain accumulator.

#![warn(clippy::all)]
#![warn(missing_docs)]

/// Module for expression parsing and evaluation
pub mod expr;

/// Module for display formatting
pub mod format;

/// Module for Chinese numeral and RMB capital conversion
pub mod numeral;

/// Module for layered configuration resolution
pub mod config;

/// Module for the fluent chain accumulator
pub mod chain;

/// Module for expression result memoization
pub mod cache;

/// Module for the instance-level calculator facade
pub mod calculator;

// Re-export main types
pub use cache::{cache_stats, calculate_cached, clear_cache, CacheStats};
pub use calculator::Calculator;
pub use chain::{chain, Chain};
pub use config::{
    get_config, reset_config, set_config, ConfigError, ConfigResult, Options, OptionsPatch,
    UnitPosition,
};
pub use expr::{calculate, calculate_batch, ExprError, ExprResult};
pub use format::{
    format, to_currency, to_fraction, to_percent, to_readable, to_scientific, to_unit,
    FormatError, FormatResult, Formatted, Locale,
};
pub use numeral::{to_chinese_capital, to_chinese_number, NumeralError, NumeralResult};

// Re-export the arithmetic primitives for convenience
pub use dcalc_math::{
    add, ceil, decimal_places, divide, floor, multiply, round, set_boundary_warnings, strip,
    subtract, MathError, MathResult, Scale, EXACT_INT_BOUND, MAX_SCALE,
};
