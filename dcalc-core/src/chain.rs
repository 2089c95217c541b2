//! Fluent chain accumulator
//!
//! A [`Chain`] wraps one numeric value plus the configuration context it is
//! bound to. Arithmetic methods consume and return the chain, threading the
//! value through the decimal-safe layer; the first failure latches and
//! surfaces at the terminal read. Formatting methods are terminal reads and
//! never mutate the held value. The type is a plain single-threaded builder;
//! it is neither `Sync`-shared nor meant to be.

use std::fmt;

use crate::config::OptionsPatch;
use crate::format::{self, Locale};
use crate::{config, MathResult, Scale};
use dcalc_math::{self as math, MathError};

/// Stateful accumulator over one numeric value
#[derive(Debug, Clone)]
pub struct Chain {
    value: f64,
    error: Option<MathError>,
    instance: Option<OptionsPatch>,
}

/// Start a chain at `initial` with no instance-level options.
///
/// ```
/// use dcalc_core::chain;
/// let result = chain(0.1).add(0.2).multiply(3.0).subtract(0.5).value().unwrap();
/// assert_eq!(result, 0.4);
/// ```
pub fn chain(initial: f64) -> Chain {
    Chain::new(initial, None)
}

impl Chain {
    /// Start a chain at `initial`, optionally bound to an instance patch
    pub fn new(initial: f64, instance: Option<OptionsPatch>) -> Self {
        Self { value: initial, error: None, instance }
    }

    fn apply(mut self, op: impl FnOnce(f64) -> MathResult<f64>) -> Self {
        if self.error.is_none() {
            match op(self.value) {
                Ok(value) => self.value = value,
                Err(error) => self.error = Some(error),
            }
        }
        self
    }

    /// Add `rhs` to the held value
    pub fn add(self, rhs: f64) -> Self {
        self.apply(|value| math::add(value, rhs))
    }

    /// Subtract `rhs` from the held value
    pub fn subtract(self, rhs: f64) -> Self {
        self.apply(|value| math::subtract(value, rhs))
    }

    /// Multiply the held value by `rhs`
    pub fn multiply(self, rhs: f64) -> Self {
        self.apply(|value| math::multiply(value, rhs))
    }

    /// Divide the held value by `rhs`
    pub fn divide(self, rhs: f64) -> Self {
        self.apply(|value| math::divide(value, rhs))
    }

    /// Round the held value at `precision` decimal places
    pub fn round(self, precision: Scale) -> Self {
        self.apply(|value| math::round(value, precision))
    }

    /// Ceil the held value at `precision` decimal places
    pub fn ceil(self, precision: Scale) -> Self {
        self.apply(|value| math::ceil(value, precision))
    }

    /// Floor the held value at `precision` decimal places
    pub fn floor(self, precision: Scale) -> Self {
        self.apply(|value| math::floor(value, precision))
    }

    /// Rebind the chain to a fresh value, clearing any latched error
    pub fn reset(&mut self, value: f64) {
        self.value = value;
        self.error = None;
    }

    /// Terminal read of the accumulated value.
    ///
    /// Reading never mutates the chain; consecutive calls return identical
    /// results.
    pub fn value(&self) -> MathResult<f64> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.value),
        }
    }

    fn options(&self) -> crate::Options {
        config::resolve(self.instance.as_ref(), None)
    }

    /// Terminal read: format as a percentage
    pub fn to_percent(&self, precision: Option<Scale>, with_symbol: bool) -> MathResult<String> {
        format::percent_with(self.value()?, precision, with_symbol, &self.options())
    }

    /// Terminal read: format as a currency amount
    pub fn to_currency(
        &self,
        symbol: &str,
        precision: Option<Scale>,
        with_thousands: Option<bool>,
    ) -> MathResult<String> {
        format::currency_with(self.value()?, symbol, precision, with_thousands, &self.options())
    }

    /// Terminal read: round and suffix a unit
    pub fn to_unit(&self, unit: &str, precision: Option<Scale>) -> MathResult<String> {
        format::unit_with(self.value()?, unit, precision, &self.options())
    }

    /// Terminal read: readable-unit formatting
    pub fn to_readable(&self, precision: Option<Scale>, locale: Locale) -> MathResult<String> {
        format::readable_with(self.value()?, precision, locale, &self.options())
    }

    /// Terminal read: scientific notation
    pub fn to_scientific(&self, precision: Option<Scale>) -> MathResult<String> {
        format::scientific_with(self.value()?, precision, &self.options())
    }

    /// Terminal read: fraction approximation
    pub fn to_fraction(&self, max_denominator: Option<u64>) -> MathResult<String> {
        format::fraction_with(self.value()?, max_denominator, &self.options())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "<error: {}>", error),
            None => write!(f, "{}", self.value),
        }
    }
}
