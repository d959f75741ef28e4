//! Parsing of locale-formatted numbers.
//!
//! Form fields arrive with a comma as decimal separator and dots as
//! thousands separators (`"3.000,50"`). These helpers turn them into
//! [`Decimal`] values before any engine runs, reporting
//! [`EngineError::InvalidFormat`] for text that is not a number.

use rust_decimal::Decimal;
use rust_decimal::prelude::RoundingStrategy;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

const CURRENCY_PREFIX: &str = "R$";

fn format_error(field: &str, value: &str) -> EngineError {
    EngineError::InvalidFormat {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Parses a locale-formatted decimal.
///
/// Every `.` is treated as a thousands separator and dropped, and the `,`
/// becomes the decimal point. An optional `R$` prefix is accepted.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::parse_locale_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_locale_decimal("gross_salary", "3.000,50").unwrap(), Decimal::new(300050, 2));
/// assert_eq!(
///     parse_locale_decimal("gross_salary", "R$ 1.412,00").unwrap(),
///     Decimal::new(141200, 2)
/// );
/// assert!(parse_locale_decimal("gross_salary", "abc").is_err());
/// ```
pub fn parse_locale_decimal(field: &str, text: &str) -> EngineResult<Decimal> {
    let trimmed = text.trim();
    let unprefixed = trimmed
        .strip_prefix(CURRENCY_PREFIX)
        .map(str::trim_start)
        .unwrap_or(trimmed);

    if unprefixed.is_empty() || unprefixed.matches(',').count() > 1 {
        return Err(format_error(field, text));
    }

    let normalized = unprefixed.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| format_error(field, text))
}

/// Like [`parse_locale_decimal`], but blank text means "not supplied".
pub fn parse_optional_locale_decimal(
    field: &str,
    text: Option<&str>,
) -> EngineResult<Option<Decimal>> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_locale_decimal(field, value).map(Some),
    }
}

/// Parses a non-negative whole count such as the number of dependents.
///
/// Non-integer text is a format error; a negative integer is a validation
/// error.
pub fn parse_count(field: &str, text: &str) -> EngineResult<u32> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| format_error(field, text))?;

    if value < 0 {
        return Err(EngineError::invalid(field, "cannot be negative"));
    }

    u32::try_from(value).map_err(|_| EngineError::invalid(field, "is too large"))
}

/// Formats an amount as Brazilian reais (`R$ 1.234,56`), rounding half away
/// from zero to cents.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::format_brl;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1.234,56");
/// assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
/// ```
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (integer, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{} {},{}", sign, CURRENCY_PREFIX, grouped, cents)
}
