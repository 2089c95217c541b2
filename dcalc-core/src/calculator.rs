//! Instance-level calculator facade
//!
//! A [`Calculator`] owns an instance-level options patch captured at
//! construction and resolves the full cascade (call > instance > global >
//! default) on every formatting call, so later global changes still show
//! through unset keys.

use crate::chain::Chain;
use crate::config::{self, Options, OptionsPatch};
use crate::format::{self, FormatResult, Formatted, Locale};
use crate::{MathResult, Scale};
use dcalc_math as math;

/// Calculator bound to an instance configuration layer
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    instance: OptionsPatch,
}

impl Calculator {
    /// Create a calculator with instance-level option overrides.
    ///
    /// A default (empty) patch yields a calculator equivalent to the
    /// free-function API.
    pub fn new(instance: OptionsPatch) -> Self {
        Self { instance }
    }

    /// The effective options as of this call, with no call-level patch
    pub fn options(&self) -> Options {
        config::resolve(Some(&self.instance), None)
    }

    /// Decimal-exact addition
    pub fn add(&self, a: f64, b: f64) -> MathResult<f64> {
        math::add(a, b)
    }

    /// Decimal-exact subtraction
    pub fn subtract(&self, a: f64, b: f64) -> MathResult<f64> {
        math::subtract(a, b)
    }

    /// Decimal-exact multiplication
    pub fn multiply(&self, a: f64, b: f64) -> MathResult<f64> {
        math::multiply(a, b)
    }

    /// Scale-aligned division
    pub fn divide(&self, a: f64, b: f64) -> MathResult<f64> {
        math::divide(a, b)
    }

    /// Round at `precision`, falling back to the resolved precision
    pub fn round(&self, x: f64, precision: Option<Scale>) -> MathResult<f64> {
        math::round(x, precision.unwrap_or_else(|| self.options().precision))
    }

    /// Ceil at `precision`, falling back to the resolved precision
    pub fn ceil(&self, x: f64, precision: Option<Scale>) -> MathResult<f64> {
        math::ceil(x, precision.unwrap_or_else(|| self.options().precision))
    }

    /// Floor at `precision`, falling back to the resolved precision
    pub fn floor(&self, x: f64, precision: Option<Scale>) -> MathResult<f64> {
        math::floor(x, precision.unwrap_or_else(|| self.options().precision))
    }

    /// Percentage formatting under this instance's options
    pub fn to_percent(
        &self,
        x: f64,
        precision: Option<Scale>,
        with_symbol: bool,
    ) -> MathResult<String> {
        format::percent_with(x, precision, with_symbol, &self.options())
    }

    /// Currency formatting under this instance's options
    pub fn to_currency(
        &self,
        x: f64,
        symbol: &str,
        precision: Option<Scale>,
        with_thousands: Option<bool>,
    ) -> MathResult<String> {
        format::currency_with(x, symbol, precision, with_thousands, &self.options())
    }

    /// Unit formatting under this instance's options
    pub fn to_unit(&self, x: f64, unit: &str, precision: Option<Scale>) -> MathResult<String> {
        format::unit_with(x, unit, precision, &self.options())
    }

    /// Readable-unit formatting under this instance's options
    pub fn to_readable(
        &self,
        x: f64,
        precision: Option<Scale>,
        locale: Locale,
    ) -> MathResult<String> {
        format::readable_with(x, precision, locale, &self.options())
    }

    /// Scientific notation under this instance's options
    pub fn to_scientific(&self, x: f64, precision: Option<Scale>) -> MathResult<String> {
        format::scientific_with(x, precision, &self.options())
    }

    /// Fraction approximation under this instance's options
    pub fn to_fraction(&self, x: f64, max_denominator: Option<u64>) -> MathResult<String> {
        format::fraction_with(x, max_denominator, &self.options())
    }

    /// Option-driven dispatch; the call patch outranks this instance's keys
    pub fn format(&self, x: f64, call: Option<&OptionsPatch>) -> FormatResult<Formatted> {
        format::format_with(x, Some(&self.instance), call)
    }

    /// Start a chain bound to this instance's options
    pub fn chain(&self, initial: f64) -> Chain {
        Chain::new(initial, Some(self.instance.clone()))
    }
}
