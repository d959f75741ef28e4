//! Statute-of-limitations models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input to the limitation calculator, tagged by `kind`.
///
/// # Example
///
/// ```
/// use legal_engine::models::LimitationInput;
///
/// let input: LimitationInput = serde_json::from_str(r#"{
///     "kind": "civil",
///     "term_years": 3,
///     "start_date": "2020-05-10"
/// }"#).unwrap();
/// assert!(matches!(input, LimitationInput::Civil { term_years: 3, .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LimitationInput {
    /// Criminal prescription based on the maximum abstract penalty.
    Criminal {
        /// Maximum penalty the statute allows, in years.
        max_abstract_penalty: Decimal,
        /// Date of the fact or of the last interruption.
        start_date: NaiveDate,
        /// Whether the term is halved (offender under 21 at the time of
        /// the fact or over 70 at sentencing).
        #[serde(default)]
        reduced_term: bool,
    },
    /// Civil prescription with a term chosen from the Civil Code.
    Civil {
        /// Term in years; one of 10, 5, 3, 2 or 1.
        term_years: u32,
        /// Date the claim arose.
        start_date: NaiveDate,
    },
}

impl LimitationInput {
    /// Returns the date the term starts running from.
    pub fn start_date(&self) -> NaiveDate {
        match self {
            LimitationInput::Criminal { start_date, .. }
            | LimitationInput::Civil { start_date, .. } => *start_date,
        }
    }
}

/// The prescription deadline and whether it has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitationResult {
    /// Prescription period that was applied, in months.
    pub period_months: u32,
    /// Prescription period in years (may be fractional when halved).
    pub period_years: Decimal,
    /// Date the right lapses.
    pub deadline_date: NaiveDate,
    /// Whether the evaluation date is on or after the deadline.
    pub expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_criminal_input() {
        let json = r#"{
            "kind": "criminal",
            "max_abstract_penalty": "4",
            "start_date": "2010-01-01"
        }"#;
        let input: LimitationInput = serde_json::from_str(json).unwrap();
        match input {
            LimitationInput::Criminal {
                max_abstract_penalty,
                reduced_term,
                ..
            } => {
                assert_eq!(max_abstract_penalty, Decimal::from(4));
                assert!(!reduced_term);
            }
            other => panic!("Expected criminal input, got {:?}", other),
        }
        assert_eq!(
            input.start_date(),
            NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{ "kind": "labor", "start_date": "2010-01-01" }"#;
        let result: Result<LimitationInput, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
