//! Statute-of-limitations (prescription) deadlines.
//!
//! Criminal periods come from a threshold table over the maximum abstract
//! penalty. Civil periods are chosen directly from the Civil Code terms.
//! Halved criminal periods are added in months so that 3 years becomes
//! exactly 18 months rather than losing the half year.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::date_arithmetic::add_months;
use crate::error::{EngineError, EngineResult};
use crate::models::{LimitationInput, LimitationResult};

/// Civil prescription terms accepted, in years.
pub const CIVIL_TERM_YEARS: [u32; 5] = [10, 5, 3, 2, 1];

/// Criminal prescription table: `(minimum max abstract penalty, period)` in
/// years, highest threshold first.
const CRIMINAL_PERIODS: [(i64, u32); 5] = [(12, 20), (8, 16), (4, 12), (2, 8), (1, 4)];

/// Period for maximum penalties below one year.
const CRIMINAL_MIN_PERIOD_YEARS: u32 = 3;

/// Prescription period in years for a maximum abstract penalty.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::criminal_period_years;
/// use rust_decimal::Decimal;
///
/// assert_eq!(criminal_period_years(Decimal::from(4)), 12);
/// assert_eq!(criminal_period_years(Decimal::new(5, 1)), 3);
/// ```
pub fn criminal_period_years(max_abstract_penalty: Decimal) -> u32 {
    CRIMINAL_PERIODS
        .iter()
        .find(|(threshold, _)| max_abstract_penalty >= Decimal::from(*threshold))
        .map(|(_, years)| *years)
        .unwrap_or(CRIMINAL_MIN_PERIOD_YEARS)
}

/// Computes the prescription deadline and whether it has passed on
/// `evaluation_date`.
///
/// # Errors
///
/// [`EngineError::InvalidInput`] for a negative maximum penalty, a civil
/// term outside [`CIVIL_TERM_YEARS`], or a deadline beyond the calendar.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::calculate_limitation;
/// use legal_engine::models::LimitationInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = LimitationInput::Criminal {
///     max_abstract_penalty: Decimal::from(4),
///     start_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
///     reduced_term: false,
/// };
/// let evaluated = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
///
/// let result = calculate_limitation(&input, evaluated).unwrap();
/// assert_eq!(result.deadline_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
/// assert!(result.expired);
/// ```
pub fn calculate_limitation(
    input: &LimitationInput,
    evaluation_date: NaiveDate,
) -> EngineResult<LimitationResult> {
    let period_months = match *input {
        LimitationInput::Criminal {
            max_abstract_penalty,
            reduced_term,
            ..
        } => {
            if max_abstract_penalty < Decimal::ZERO {
                return Err(EngineError::invalid(
                    "max_abstract_penalty",
                    "cannot be negative",
                ));
            }
            let months = criminal_period_years(max_abstract_penalty) * 12;
            if reduced_term { months / 2 } else { months }
        }
        LimitationInput::Civil { term_years, .. } => {
            if !CIVIL_TERM_YEARS.contains(&term_years) {
                return Err(EngineError::invalid(
                    "term_years",
                    "must be one of 10, 5, 3, 2 or 1",
                ));
            }
            term_years * 12
        }
    };

    let start_date = input.start_date();
    let deadline_date = i32::try_from(period_months)
        .ok()
        .and_then(|months| add_months(start_date, months))
        .ok_or_else(|| EngineError::invalid("start_date", "deadline is out of range"))?;

    Ok(LimitationResult {
        period_months,
        period_years: Decimal::from(period_months) / Decimal::from(12),
        deadline_date,
        expired: evaluation_date >= deadline_date,
    })
}
