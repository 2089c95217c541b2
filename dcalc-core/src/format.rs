//! Display formatting
//!
//! Rounding-aware presentation of numbers: percentage, currency with
//! thousands grouping, unit suffixes, locale readable-unit ladders,
//! scientific notation, fraction approximation, and the option-driven
//! [`format`] dispatcher. All numeric steps go through the decimal-safe
//! layer so the displayed digits match the decimal value, not the binary
//! one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::{self, Options, OptionsPatch, UnitPosition};
use crate::numeral::{self, NumeralError};
use dcalc_math::{divide, multiply, round, MathError, MathResult, Scale};

/// Errors that can occur while formatting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Arithmetic failure while preparing the value
    #[error(transparent)]
    Math(#[from] MathError),
    /// Numeral conversion failure in a Chinese-numeral dispatch
    #[error(transparent)]
    Numeral(#[from] NumeralError),
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Output of [`format`]: a bare number when no display option fires,
/// otherwise the composed text
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    /// No display option applied; the rounded value passes through
    Number(f64),
    /// At least one display option applied
    Text(String),
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatted::Number(value) => write!(f, "{}", plain_string(*value)),
            Formatted::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Readable-unit locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// K / M / B / T ladder
    En,
    /// 万 / 亿 ladder
    Zh,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

const ZH_LADDER: [(f64, &str); 2] = [(1e8, "亿"), (1e4, "万")];
const EN_LADDER: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Canonical trimmed decimal string; normalizes negative zero
fn plain_string(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Insert `separator` every three digits, counting from the right
fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::new();
    let chars: Vec<char> = digits.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        result.push(ch);
        let remaining = chars.len() - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            result.push(separator);
        }
    }

    result
}

/// Fixed-decimal body with optional thousands grouping and the configured
/// separators; `value` must already be decimally rounded to `precision`
fn decimal_body(value: f64, precision: Scale, with_thousands: bool, opts: &Options) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match fixed.find('.') {
        Some(dot) => (&fixed[..dot], Some(&fixed[dot + 1..])),
        None => (fixed.as_str(), None),
    };

    let mut body = String::new();
    if value < 0.0 {
        body.push('-');
    }
    if with_thousands {
        body.push_str(&group_digits(int_part, opts.thousands_separator_char));
    } else {
        body.push_str(int_part);
    }
    if let Some(frac) = frac_part {
        body.push(opts.decimal_separator);
        body.push_str(frac);
    }
    body
}

/// Affix a symbol per position, keeping any sign in front of a prefix
fn affix(body: String, symbol: &str, position: UnitPosition) -> String {
    if symbol.is_empty() {
        return body;
    }
    match position {
        UnitPosition::Prefix => match body.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", symbol, magnitude),
            None => format!("{}{}", symbol, body),
        },
        UnitPosition::Suffix => format!("{}{}", body, symbol),
    }
}

pub(crate) fn percent_with(
    x: f64,
    precision: Option<Scale>,
    with_symbol: bool,
    opts: &Options,
) -> MathResult<String> {
    let precision = precision.unwrap_or(opts.precision);
    let value = round(multiply(x, 100.0)?, precision)?;
    let mut out = plain_string(value);
    if with_symbol {
        out.push('%');
    }
    Ok(out)
}

pub(crate) fn currency_with(
    x: f64,
    symbol: &str,
    precision: Option<Scale>,
    with_thousands: Option<bool>,
    opts: &Options,
) -> MathResult<String> {
    let precision = precision.unwrap_or(opts.precision);
    let with_thousands = with_thousands.unwrap_or(opts.thousands_separator);
    let value = round(x, precision)?;
    let body = decimal_body(value, precision, with_thousands, opts);
    Ok(affix(body, symbol, opts.unit_position))
}

pub(crate) fn unit_with(
    x: f64,
    unit: &str,
    precision: Option<Scale>,
    opts: &Options,
) -> MathResult<String> {
    let precision = precision.unwrap_or(opts.precision);
    let value = round(x, precision)?;
    Ok(format!("{}{}", plain_string(value), unit))
}

pub(crate) fn readable_with(
    x: f64,
    precision: Option<Scale>,
    locale: Locale,
    opts: &Options,
) -> MathResult<String> {
    let precision = precision.unwrap_or(opts.precision);
    let ladder: &[(f64, &str)] = match locale {
        Locale::Zh => &ZH_LADDER,
        Locale::En => &EN_LADDER,
    };
    for (threshold, symbol) in ladder {
        if x.abs() >= *threshold {
            let value = round(divide(x, *threshold)?, precision)?;
            return Ok(format!("{}{}", plain_string(value), symbol));
        }
    }
    Ok(plain_string(round(x, precision)?))
}

pub(crate) fn scientific_with(x: f64, precision: Option<Scale>, opts: &Options) -> MathResult<String> {
    if !x.is_finite() {
        return Err(MathError::InvalidInput(x));
    }
    let precision = precision.unwrap_or(opts.precision);
    Ok(format!("{:.*e}", precision as usize, x))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

pub(crate) fn fraction_with(
    x: f64,
    max_denominator: Option<u64>,
    _opts: &Options,
) -> MathResult<String> {
    if !x.is_finite() {
        return Err(MathError::InvalidInput(x));
    }
    let max_denominator = max_denominator.unwrap_or(100).max(2);
    let sign = if x < 0.0 { "-" } else { "" };
    let magnitude = x.abs();
    let mut int_part = magnitude.trunc() as i64;
    let frac = dcalc_math::subtract(magnitude, magnitude.trunc())?;
    if frac == 0.0 {
        return Ok(format!("{}{}", sign, int_part));
    }

    // Brute-force search for the denominator minimizing the approximation
    // error; plain float math is fine here, exactness is not the contract.
    let mut best_num = 0u64;
    let mut best_den = 2u64;
    let mut best_err = f64::INFINITY;
    for den in 2..=max_denominator {
        let num = (frac * den as f64).round() as u64;
        let err = (frac - num as f64 / den as f64).abs();
        if err < best_err {
            best_num = num;
            best_den = den;
            best_err = err;
            if err == 0.0 {
                break;
            }
        }
    }

    let divisor = gcd(best_num, best_den);
    let mut num = best_num / divisor;
    let den = best_den / divisor;

    if num == 0 {
        return Ok(format!("{}{}", sign, int_part));
    }
    if den == 1 {
        int_part += num as i64;
        return Ok(format!("{}{}", sign, int_part));
    }
    if int_part > 0 {
        Ok(format!("{}{} {}/{}", sign, int_part, num, den))
    } else {
        Ok(format!("{}{}/{}", sign, num, den))
    }
}

pub(crate) fn format_with(
    x: f64,
    instance: Option<&OptionsPatch>,
    call: Option<&OptionsPatch>,
) -> FormatResult<Formatted> {
    let opts = config::resolve(instance, call);

    // Dispatch priority: capital numerals, then spoken numerals, then the
    // plain rounding pipeline.
    if opts.chinese_capital {
        return Ok(Formatted::Text(numeral::to_chinese_capital(x)?));
    }
    if opts.chinese_number {
        let body = numeral::to_chinese_number(x)?;
        return Ok(Formatted::Text(affix(body, &opts.unit, opts.unit_position)));
    }

    let value = round(x, opts.precision).map_err(FormatError::Math)?;
    if !opts.thousands_separator && opts.unit.is_empty() && !opts.uppercase {
        return Ok(Formatted::Number(value));
    }

    let body = decimal_body(value, opts.precision, opts.thousands_separator, &opts);
    let mut text = affix(body, &opts.unit, opts.unit_position);
    if opts.uppercase {
        text = text.to_uppercase();
    }
    Ok(Formatted::Text(text))
}

/// Format `x` as a percentage.
///
/// ```
/// use dcalc_core::to_percent;
/// assert_eq!(to_percent(0.1234, Some(2), true).unwrap(), "12.34%");
/// ```
pub fn to_percent(x: f64, precision: Option<Scale>, with_symbol: bool) -> MathResult<String> {
    percent_with(x, precision, with_symbol, &config::resolve(None, None))
}

/// Format `x` as a currency amount.
///
/// ```
/// use dcalc_core::to_currency;
/// assert_eq!(
///     to_currency(1234567.891, "$", Some(2), Some(true)).unwrap(),
///     "$1,234,567.89"
/// );
/// ```
pub fn to_currency(
    x: f64,
    symbol: &str,
    precision: Option<Scale>,
    with_thousands: Option<bool>,
) -> MathResult<String> {
    currency_with(x, symbol, precision, with_thousands, &config::resolve(None, None))
}

/// Round `x` and suffix a unit string.
pub fn to_unit(x: f64, unit: &str, precision: Option<Scale>) -> MathResult<String> {
    unit_with(x, unit, precision, &config::resolve(None, None))
}

/// Format `x` against a locale readable-unit ladder.
///
/// ```
/// use dcalc_core::{to_readable, Locale};
/// assert_eq!(to_readable(123456.0, Some(2), Locale::Zh).unwrap(), "12.35万");
/// assert_eq!(to_readable(1500000.0, Some(1), Locale::En).unwrap(), "1.5M");
/// ```
pub fn to_readable(x: f64, precision: Option<Scale>, locale: Locale) -> MathResult<String> {
    readable_with(x, precision, locale, &config::resolve(None, None))
}

/// Format `x` in exponential notation at the given precision.
pub fn to_scientific(x: f64, precision: Option<Scale>) -> MathResult<String> {
    scientific_with(x, precision, &config::resolve(None, None))
}

/// Approximate the fractional part of `x` as a reduced fraction.
///
/// ```
/// use dcalc_core::to_fraction;
/// assert_eq!(to_fraction(0.5, None).unwrap(), "1/2");
/// assert_eq!(to_fraction(1.25, None).unwrap(), "1 1/4");
/// ```
pub fn to_fraction(x: f64, max_denominator: Option<u64>) -> MathResult<String> {
    fraction_with(x, max_denominator, &config::resolve(None, None))
}

/// Resolve the effective options and dispatch to the matching renderer.
///
/// Returns [`Formatted::Text`] when any display option fires, otherwise the
/// rounded [`Formatted::Number`].
pub fn format(x: f64, call: Option<&OptionsPatch>) -> FormatResult<Formatted> {
    format_with(x, None, call)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Options {
        Options::default()
    }

    #[test]
    fn test_percent() {
        let opts = defaults();
        assert_eq!(percent_with(0.1234, Some(2), true, &opts).unwrap(), "12.34%");
        assert_eq!(percent_with(0.1234, Some(1), false, &opts).unwrap(), "12.3");
        assert_eq!(percent_with(1.0, Some(0), true, &opts).unwrap(), "100%");
        assert_eq!(percent_with(-0.07, Some(2), true, &opts).unwrap(), "-7%");
    }

    #[test]
    fn test_currency_prefix_grouping() {
        let opts = defaults();
        assert_eq!(
            currency_with(1234567.891, "$", Some(2), Some(true), &opts).unwrap(),
            "$1,234,567.89"
        );
        assert_eq!(
            currency_with(-1234.5, "¥", Some(2), Some(true), &opts).unwrap(),
            "-¥1,234.50"
        );
        assert_eq!(
            currency_with(42.0, "$", Some(2), Some(false), &opts).unwrap(),
            "$42.00"
        );
    }

    #[test]
    fn test_currency_custom_separators() {
        let opts = Options {
            thousands_separator_char: '.',
            decimal_separator: ',',
            unit_position: UnitPosition::Suffix,
            ..defaults()
        };
        assert_eq!(
            currency_with(1234567.891, "€", Some(2), Some(true), &opts).unwrap(),
            "1.234.567,89€"
        );
    }

    #[test]
    fn test_unit() {
        let opts = defaults();
        assert_eq!(unit_with(12.345, "km", Some(1), &opts).unwrap(), "12.3km");
        assert_eq!(unit_with(5.0, "元", Some(0), &opts).unwrap(), "5元");
    }

    #[test]
    fn test_readable_ladders() {
        let opts = defaults();
        assert_eq!(readable_with(123456.0, Some(2), Locale::Zh, &opts).unwrap(), "12.35万");
        assert_eq!(readable_with(250000000.0, Some(1), Locale::Zh, &opts).unwrap(), "2.5亿");
        assert_eq!(readable_with(1500000.0, Some(1), Locale::En, &opts).unwrap(), "1.5M");
        assert_eq!(readable_with(1500.0, Some(0), Locale::En, &opts).unwrap(), "2K");
        assert_eq!(readable_with(2.5e12, Some(1), Locale::En, &opts).unwrap(), "2.5T");
        // below the smallest threshold the plain rounded value comes back
        assert_eq!(readable_with(999.0, Some(1), Locale::En, &opts).unwrap(), "999");
        assert_eq!(readable_with(-123456.0, Some(2), Locale::Zh, &opts).unwrap(), "-12.35万");
    }

    #[test]
    fn test_scientific() {
        let opts = defaults();
        assert_eq!(scientific_with(123456.0, Some(2), &opts).unwrap(), "1.23e5");
        assert_eq!(scientific_with(0.00123, Some(1), &opts).unwrap(), "1.2e-3");
    }

    #[test]
    fn test_fraction_forms() {
        let opts = defaults();
        assert_eq!(fraction_with(0.5, None, &opts).unwrap(), "1/2");
        assert_eq!(fraction_with(1.25, None, &opts).unwrap(), "1 1/4");
        assert_eq!(fraction_with(-0.75, None, &opts).unwrap(), "-3/4");
        assert_eq!(fraction_with(3.0, None, &opts).unwrap(), "3");
        assert_eq!(fraction_with(0.3333333333333333, None, &opts).unwrap(), "1/3");
    }

    #[test]
    fn test_fraction_denominator_cap() {
        let opts = defaults();
        // 1/1000 is below the default cap's resolution; rounds away
        assert_eq!(fraction_with(5.001, Some(10), &opts).unwrap(), "5");
    }

    #[test]
    fn test_format_number_passthrough() {
        let patch = OptionsPatch::precision(2);
        assert_eq!(format(1.2345, Some(&patch)).unwrap(), Formatted::Number(1.23));
    }

    #[test]
    fn test_format_text_composition() {
        let patch = OptionsPatch {
            precision: Some(1),
            thousands_separator: Some(true),
            unit: Some("km".to_string()),
            unit_position: Some(UnitPosition::Suffix),
            uppercase: Some(true),
            ..OptionsPatch::default()
        };
        assert_eq!(
            format(1234.56, Some(&patch)).unwrap(),
            Formatted::Text("1,234.6KM".to_string())
        );
    }

    #[test]
    fn test_format_chinese_dispatch_priority() {
        let patch = OptionsPatch {
            chinese_capital: Some(true),
            chinese_number: Some(true),
            ..OptionsPatch::default()
        };
        // capital wins over spoken numerals
        assert_eq!(
            format(1234.0, Some(&patch)).unwrap(),
            Formatted::Text("壹仟贰佰叁拾肆元整".to_string())
        );

        let patch = OptionsPatch {
            chinese_number: Some(true),
            unit: Some("元".to_string()),
            unit_position: Some(UnitPosition::Suffix),
            ..OptionsPatch::default()
        };
        assert_eq!(
            format(1234.0, Some(&patch)).unwrap(),
            Formatted::Text("一千二百三十四元".to_string())
        );
    }

    #[test]
    fn test_formatted_display() {
        assert_eq!(Formatted::Number(1.5).to_string(), "1.5");
        assert_eq!(Formatted::Text("abc".to_string()).to_string(), "abc");
    }
}
