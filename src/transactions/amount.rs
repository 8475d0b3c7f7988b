//! Parsing typed amounts into minor units and formatting them back.
//!
//! Input may carry `,` thousands separators and surrounding whitespace.
//! Separators must sit between groups of three whole digits.
//! Values are parsed as [`Decimal`] so `"3.5"` is exactly 350 minor units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("not a number: {0}")]
    Invalid(String),

    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("at most {max_digits} decimal places are allowed")]
    TooPrecise { max_digits: u32 },

    #[error("amount is too large")]
    Overflow,
}

/// Parse user input as a positive amount in minor units.
///
/// A `,` is accepted only as a thousands separator: the leading group has
/// one to three digits and every later group exactly three. Anything else,
/// such as `"1,2"` or a comma after the decimal point, is `Invalid`.
///
/// ```rust
/// use smartmoney::transactions::parse_positive_minor;
///
/// assert_eq!(parse_positive_minor("3.5", 2), Ok(350));
/// assert_eq!(parse_positive_minor(" 1,200 ", 2), Ok(120_000));
/// assert!(parse_positive_minor("0", 2).is_err());
/// assert!(parse_positive_minor("1,2", 2).is_err());
/// ```
pub fn parse_positive_minor(text: &str, minor_unit_digits: u32) -> Result<i64, AmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let cleaned = strip_separators(trimmed)?;
    let value = Decimal::from_str(&cleaned).map_err(|err| AmountError::Invalid(err.to_string()))?;
    if value <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }

    let value = value.normalize();
    if value.scale() > minor_unit_digits {
        return Err(AmountError::TooPrecise {
            max_digits: minor_unit_digits,
        });
    }
    let factor = 10i64
        .checked_pow(minor_unit_digits)
        .ok_or(AmountError::Overflow)?;
    value
        .checked_mul(Decimal::from(factor))
        .and_then(|minor| minor.to_i64())
        .ok_or(AmountError::Overflow)
}

fn strip_separators(text: &str) -> Result<String, AmountError> {
    if !text.contains(',') {
        return Ok(text.to_string());
    }
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    let mut groups = whole
        .trim_start_matches(|c| c == '+' || c == '-')
        .split(',');
    let leading_ok = groups
        .next()
        .is_some_and(|group| (1..=3).contains(&group.len()));
    let rest_ok = groups.all(|group| group.len() == 3);
    if !leading_ok || !rest_ok || fraction.contains(',') {
        return Err(AmountError::Invalid(format!(
            "misplaced thousands separator in {text:?}"
        )));
    }
    Ok(text.replace(',', ""))
}

/// Render a signed amount the way the list shows it: `₦+ 150,000`,
/// `₦- 1,200.50`. Zero has no sign.
pub fn format_signed(amount_minor: i64, symbol: &str, minor_unit_digits: u32) -> String {
    let magnitude = format_magnitude(amount_minor.unsigned_abs(), minor_unit_digits);
    match amount_minor.signum() {
        1 => format!("{symbol}+ {magnitude}"),
        -1 => format!("{symbol}- {magnitude}"),
        _ => format!("{symbol}{magnitude}"),
    }
}

/// Render an unsigned total: `₦245,000`.
pub fn format_total(amount_minor: i64, symbol: &str, minor_unit_digits: u32) -> String {
    let magnitude = format_magnitude(amount_minor.unsigned_abs(), minor_unit_digits);
    if amount_minor < 0 {
        format!("-{symbol}{magnitude}")
    } else {
        format!("{symbol}{magnitude}")
    }
}

/// Grouped whole part, fraction only when it is non-zero.
fn format_magnitude(magnitude: u64, minor_unit_digits: u32) -> String {
    let scale = 10u64.saturating_pow(minor_unit_digits);
    let whole = magnitude / scale;
    let fraction = magnitude % scale;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        grouped
    } else {
        let width = minor_unit_digits as usize;
        format!("{grouped}.{fraction:0width$}")
    }
}
