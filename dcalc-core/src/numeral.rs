//! Chinese numeral and RMB capital conversion
//!
//! Converts Arabic numbers to spoken Chinese numerals (一千二百三十四) and to
//! the formal anti-fraud RMB capital form used on financial documents
//! (壹仟贰佰叁拾肆元整). Deliberately independent of the scaled-arithmetic
//! stack; the only numeric work here is splitting digits.

use thiserror::Error;

/// Errors that can occur during numeral conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumeralError {
    /// Magnitude exceeds the supported unit ladder
    #[error("value {0} is out of the supported numeral range")]
    OutOfRange(f64),
    /// NaN or infinite input
    #[error("cannot convert non-finite value {0}")]
    InvalidInput(f64),
}

/// Result type for numeral conversion
pub type NumeralResult<T> = Result<T, NumeralError>;

const DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const SECTION_UNITS: [&str; 4] = ["", "十", "百", "千"];
const GROUP_UNITS: [&str; 4] = ["", "万", "亿", "兆"];

const CAPITAL_DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];
const CAPITAL_SECTION_UNITS: [&str; 4] = ["", "拾", "佰", "仟"];

/// Largest value accepted by [`to_chinese_capital`]
const CAPITAL_LIMIT: f64 = 1e12;
/// Largest magnitude whose integer part is still exact in an f64
const NUMBER_LIMIT: f64 = 1e16;

struct NumeralTable {
    digits: [char; 10],
    section_units: [&'static str; 4],
    // spoken Chinese drops the leading 一 of 十 for 10..20; capital never does
    colloquial_ten: bool,
}

const SPOKEN: NumeralTable =
    NumeralTable { digits: DIGITS, section_units: SECTION_UNITS, colloquial_ten: true };
const CAPITAL: NumeralTable =
    NumeralTable { digits: CAPITAL_DIGITS, section_units: CAPITAL_SECTION_UNITS, colloquial_ten: false };

/// Convert a 4-digit section (1..=9999) with internal zero bridging
fn convert_section(section: i128, table: &NumeralTable) -> String {
    let mut out = String::new();
    let mut zero_pending = false;
    for position in (0..4).rev() {
        let digit = (section / 10_i128.pow(position) % 10) as usize;
        if digit == 0 {
            if !out.is_empty() {
                zero_pending = true;
            }
        } else {
            if zero_pending {
                out.push(table.digits[0]);
                zero_pending = false;
            }
            out.push(table.digits[digit]);
            out.push_str(table.section_units[position as usize]);
        }
    }
    out
}

/// Convert a non-negative integer through the 4-digit group ladder
fn convert_integer(value: i128, table: &NumeralTable) -> String {
    if value == 0 {
        return table.digits[0].to_string();
    }

    let mut groups = [0i128; 4];
    let mut rest = value;
    for group in groups.iter_mut() {
        *group = rest % 10_000;
        rest /= 10_000;
    }

    let mut out = String::new();
    let mut zero_bridge = false;
    for index in (0..4).rev() {
        let group = groups[index];
        if group == 0 {
            if !out.is_empty() {
                zero_bridge = true;
            }
            continue;
        }
        if !out.is_empty() && (zero_bridge || group < 1000) {
            out.push(table.digits[0]);
        }
        out.push_str(&convert_section(group, table));
        out.push_str(GROUP_UNITS[index]);
        zero_bridge = false;
    }

    if table.colloquial_ten {
        if let Some(stripped) = out.strip_prefix("一十") {
            return format!("十{}", stripped);
        }
    }
    out
}

/// Convert a number to spoken Chinese numerals.
///
/// Negative values read 负; fractional digits are spoken one by one after
/// 点.
///
/// ```
/// use dcalc_core::to_chinese_number;
/// assert_eq!(to_chinese_number(1234.0).unwrap(), "一千二百三十四");
/// assert_eq!(to_chinese_number(-0.5).unwrap(), "负零点五");
/// ```
///
/// # Errors
/// [`NumeralError::InvalidInput`] for non-finite input;
/// [`NumeralError::OutOfRange`] at or above 10^16, where the integer part is
/// no longer exact.
pub fn to_chinese_number(x: f64) -> NumeralResult<String> {
    if !x.is_finite() {
        return Err(NumeralError::InvalidInput(x));
    }
    if x.abs() >= NUMBER_LIMIT {
        return Err(NumeralError::OutOfRange(x));
    }

    let magnitude = x.abs();
    let mut out = String::new();
    if x.is_sign_negative() && magnitude != 0.0 {
        out.push('负');
    }
    out.push_str(&convert_integer(magnitude.trunc() as i128, &SPOKEN));

    // Fractional digits come straight from the canonical decimal string
    let repr = magnitude.to_string();
    if let Some(dot) = repr.find('.') {
        out.push('点');
        for ch in repr[dot + 1..].chars() {
            let digit = ch.to_digit(10).unwrap_or(0) as usize;
            out.push(DIGITS[digit]);
        }
    }

    Ok(out)
}

/// Decimal-exact cent count, taken from the canonical decimal string so that
/// inputs like 1.005 (stored as 1.00499…) still round to the written amount
fn to_cents(magnitude: f64) -> i128 {
    let repr = magnitude.to_string();
    let (int_str, frac_str) = match repr.find('.') {
        Some(dot) => (&repr[..dot], &repr[dot + 1..]),
        None => (repr.as_str(), ""),
    };
    let int_val: i128 = int_str.parse().unwrap_or(0);
    let mut frac_digits = frac_str.chars().map(|ch| ch.to_digit(10).unwrap_or(0) as i128);
    let jiao = frac_digits.next().unwrap_or(0);
    let fen = frac_digits.next().unwrap_or(0);
    let mut cents = int_val * 100 + jiao * 10 + fen;
    if frac_digits.next().unwrap_or(0) >= 5 {
        cents += 1;
    }
    cents
}

/// Convert a number to the formal RMB capital form.
///
/// The integer part is chunked into 4-digit groups carrying 万/亿/兆
/// suffixes; the fractional part maps to 角 and 分 (rounded to the fen); an
/// exact integer amount gets the 整 suffix.
///
/// ```
/// use dcalc_core::to_chinese_capital;
/// assert_eq!(to_chinese_capital(0.0).unwrap(), "零元整");
/// assert_eq!(to_chinese_capital(1000000.0).unwrap(), "壹佰万元整");
/// assert_eq!(to_chinese_capital(1.05).unwrap(), "壹元零伍分");
/// ```
///
/// # Errors
/// [`NumeralError::OutOfRange`] above 10^12;
/// [`NumeralError::InvalidInput`] for non-finite input.
pub fn to_chinese_capital(x: f64) -> NumeralResult<String> {
    if !x.is_finite() {
        return Err(NumeralError::InvalidInput(x));
    }
    if x.abs() > CAPITAL_LIMIT {
        return Err(NumeralError::OutOfRange(x));
    }

    let cents = to_cents(x.abs());
    let yuan = cents / 100;
    let jiao = cents % 100 / 10;
    let fen = cents % 10;

    let mut out = String::new();
    if x.is_sign_negative() && cents != 0 {
        out.push('负');
    }

    // 0.xx amounts omit the 零元 head
    if yuan > 0 || (jiao == 0 && fen == 0) {
        out.push_str(&convert_integer(yuan, &CAPITAL));
        out.push('元');
    }

    if jiao == 0 && fen == 0 {
        out.push('整');
        return Ok(out);
    }
    if jiao > 0 {
        out.push(CAPITAL_DIGITS[jiao as usize]);
        out.push('角');
    } else if yuan > 0 {
        // zero bridge between 元 and 分
        out.push(CAPITAL_DIGITS[0]);
    }
    if fen > 0 {
        out.push(CAPITAL_DIGITS[fen as usize]);
        out.push('分');
    }

    Ok(out)
}
