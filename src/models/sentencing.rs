//! Criminal sentencing models.
//!
//! Inputs and outputs of the dosimetry calculator: the statutory range of a
//! crime, the legal fractions used in the third phase, and the prison regime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory penalty range of a crime, in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeRecord {
    /// Legal minimum.
    pub penalty_min: Decimal,
    /// Legal maximum.
    pub penalty_max: Decimal,
}

/// A legal fraction used by causes of increase or decrease.
///
/// Serialized as the literal fraction (`"0"`, `"1/6"`, `"1/3"`, `"1/2"`,
/// `"2/3"`, `"1"`).
///
/// # Example
///
/// ```
/// use legal_engine::models::LegalFraction;
///
/// assert_eq!(LegalFraction::OneThird.ratio(), (1, 3));
/// assert_eq!(serde_json::to_string(&LegalFraction::TwoThirds).unwrap(), "\"2/3\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LegalFraction {
    /// No change.
    #[default]
    #[serde(rename = "0")]
    Zero,
    /// One sixth.
    #[serde(rename = "1/6")]
    OneSixth,
    /// One third.
    #[serde(rename = "1/3")]
    OneThird,
    /// One half.
    #[serde(rename = "1/2")]
    Half,
    /// Two thirds.
    #[serde(rename = "2/3")]
    TwoThirds,
    /// The whole (doubling when used as an increase).
    #[serde(rename = "1")]
    Whole,
}

impl LegalFraction {
    /// Returns the fraction as `(numerator, denominator)`.
    pub fn ratio(self) -> (i64, i64) {
        match self {
            LegalFraction::Zero => (0, 1),
            LegalFraction::OneSixth => (1, 6),
            LegalFraction::OneThird => (1, 3),
            LegalFraction::Half => (1, 2),
            LegalFraction::TwoThirds => (2, 3),
            LegalFraction::Whole => (1, 1),
        }
    }

    /// Returns the wire literal for this fraction.
    pub fn as_str(self) -> &'static str {
        match self {
            LegalFraction::Zero => "0",
            LegalFraction::OneSixth => "1/6",
            LegalFraction::OneThird => "1/3",
            LegalFraction::Half => "1/2",
            LegalFraction::TwoThirds => "2/3",
            LegalFraction::Whole => "1",
        }
    }

    /// Parses a wire literal such as `"1/6"`.
    ///
    /// ```
    /// use legal_engine::models::LegalFraction;
    ///
    /// assert_eq!(LegalFraction::from_literal(" 1/2 "), Some(LegalFraction::Half));
    /// assert_eq!(LegalFraction::from_literal("3/4"), None);
    /// ```
    pub fn from_literal(text: &str) -> Option<Self> {
        match text.trim() {
            "0" => Some(LegalFraction::Zero),
            "1/6" => Some(LegalFraction::OneSixth),
            "1/3" => Some(LegalFraction::OneThird),
            "1/2" => Some(LegalFraction::Half),
            "2/3" => Some(LegalFraction::TwoThirds),
            "1" => Some(LegalFraction::Whole),
            _ => None,
        }
    }

    /// Multiplies `value` by `1 + fraction`, or `None` on overflow.
    pub fn increase(self, value: Decimal) -> Option<Decimal> {
        let (n, d) = self.ratio();
        value
            .checked_mul(Decimal::from(d + n))?
            .checked_div(Decimal::from(d))
    }

    /// Multiplies `value` by `1 - fraction`, or `None` on overflow.
    pub fn decrease(self, value: Decimal) -> Option<Decimal> {
        let (n, d) = self.ratio();
        value
            .checked_mul(Decimal::from(d - n))?
            .checked_div(Decimal::from(d))
    }
}

/// Everything the dosimetry calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosimetryInput {
    /// Statutory range of the crime.
    pub crime: CrimeRecord,
    /// Base penalty fixed in phase 1, in years.
    pub base_penalty: Decimal,
    /// Number of aggravating circumstances.
    pub aggravating_count: u32,
    /// Number of mitigating circumstances.
    pub mitigating_count: u32,
    /// Cause of increase applied in phase 3.
    #[serde(default)]
    pub increase_fraction: LegalFraction,
    /// Cause of decrease applied in phase 3; `Whole` is not allowed.
    #[serde(default)]
    pub decrease_fraction: LegalFraction,
}

/// Initial prison regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    /// Sentences up to 4 years.
    Open,
    /// Sentences above 4 and up to 8 years.
    SemiOpen,
    /// Sentences above 8 years.
    Closed,
}

/// Penalty after each phase and the resulting regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosimetryResult {
    /// Base penalty.
    pub phase1: Decimal,
    /// Penalty after aggravating and mitigating circumstances.
    pub phase2: Decimal,
    /// Final penalty after causes of increase and decrease.
    pub phase3: Decimal,
    /// Initial regime for the final penalty.
    pub regime: Regime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_literals_round_trip() {
        for fraction in [
            LegalFraction::Zero,
            LegalFraction::OneSixth,
            LegalFraction::OneThird,
            LegalFraction::Half,
            LegalFraction::TwoThirds,
            LegalFraction::Whole,
        ] {
            let json = serde_json::to_string(&fraction).unwrap();
            assert_eq!(json, format!("\"{}\"", fraction.as_str()));
            let parsed: LegalFraction = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, fraction);
        }
    }

    #[test]
    fn test_decimal_fraction_literal_is_rejected() {
        let result: Result<LegalFraction, _> = serde_json::from_str("\"0.3333\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_increase_by_half() {
        assert_eq!(LegalFraction::Half.increase(Decimal::from(4)), Some(Decimal::from(6)));
    }

    #[test]
    fn test_increase_by_whole_doubles() {
        assert_eq!(LegalFraction::Whole.increase(Decimal::from(4)), Some(Decimal::from(8)));
    }

    #[test]
    fn test_decrease_by_two_thirds() {
        assert_eq!(LegalFraction::TwoThirds.decrease(Decimal::from(6)), Some(Decimal::from(2)));
    }

    #[test]
    fn test_zero_fraction_is_identity() {
        let value = Decimal::new(55, 1);
        assert_eq!(LegalFraction::Zero.increase(value), Some(value));
        assert_eq!(LegalFraction::Zero.decrease(value), Some(value));
    }

    #[test]
    fn test_increase_overflow_is_none() {
        assert_eq!(LegalFraction::Whole.increase(Decimal::MAX), None);
        assert_eq!(LegalFraction::Zero.increase(Decimal::MAX), Some(Decimal::MAX));
    }

    #[test]
    fn test_from_literal_matches_wire_literals() {
        for fraction in [
            LegalFraction::Zero,
            LegalFraction::OneSixth,
            LegalFraction::OneThird,
            LegalFraction::Half,
            LegalFraction::TwoThirds,
            LegalFraction::Whole,
        ] {
            assert_eq!(LegalFraction::from_literal(fraction.as_str()), Some(fraction));
        }
        assert_eq!(LegalFraction::from_literal("0.5"), None);
        assert_eq!(LegalFraction::from_literal(""), None);
    }

    #[test]
    fn test_regime_serialization() {
        assert_eq!(serde_json::to_string(&Regime::Open).unwrap(), "\"OPEN\"");
        assert_eq!(
            serde_json::to_string(&Regime::SemiOpen).unwrap(),
            "\"SEMI_OPEN\""
        );
        assert_eq!(serde_json::to_string(&Regime::Closed).unwrap(), "\"CLOSED\"");
    }

    #[test]
    fn test_dosimetry_input_defaults_fractions_to_zero() {
        let json = r#"{
            "crime": { "penalty_min": "1", "penalty_max": "4" },
            "base_penalty": "1",
            "aggravating_count": 0,
            "mitigating_count": 0
        }"#;
        let input: DosimetryInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.increase_fraction, LegalFraction::Zero);
        assert_eq!(input.decrease_fraction, LegalFraction::Zero);
    }
}
