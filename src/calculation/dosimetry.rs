//! Criminal sentence dosimetry.
//!
//! The sentence is fixed in three ordered phases:
//!
//! 1. **Base penalty** chosen inside the statutory range.
//! 2. **Circumstances**: each aggravating circumstance adds 1/6 of the base
//!    and each mitigating one removes 1/6. The result is clamped to the
//!    statutory range.
//! 3. **Causes of increase and decrease**: the increase fraction is applied
//!    first, then the decrease fraction on the increased value. This phase is
//!    not clamped and may leave the statutory range.
//!
//! The initial regime follows from the final penalty: above 8 years closed,
//! above 4 years semi-open, otherwise open.

use rust_decimal::Decimal;
use rust_decimal::prelude::RoundingStrategy;

use crate::error::{EngineError, EngineResult};
use crate::models::{DosimetryInput, DosimetryResult, LegalFraction, Regime};

/// Share of the base penalty each circumstance moves in phase 2.
pub const CIRCUMSTANCE_DENOMINATOR: i64 = 6;

/// Final penalties above this many years start in the closed regime.
pub const CLOSED_REGIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Final penalties above this many years start in the semi-open regime.
pub const SEMI_OPEN_REGIME_THRESHOLD: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Runs the three dosimetry phases.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the statutory range is
/// negative or inverted, when the base penalty lies outside it, when the
/// decrease fraction is `1` (which would erase the sentence), or when a
/// phase leaves the range `Decimal` can represent.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::calculate_dosimetry;
/// use legal_engine::models::{CrimeRecord, DosimetryInput, LegalFraction, Regime};
/// use rust_decimal::Decimal;
///
/// // Homicide, base at the minimum, two aggravating circumstances
/// let input = DosimetryInput {
///     crime: CrimeRecord { penalty_min: Decimal::from(6), penalty_max: Decimal::from(20) },
///     base_penalty: Decimal::from(6),
///     aggravating_count: 2,
///     mitigating_count: 0,
///     increase_fraction: LegalFraction::Zero,
///     decrease_fraction: LegalFraction::Zero,
/// };
///
/// let result = calculate_dosimetry(&input).unwrap();
/// assert_eq!(result.phase2, Decimal::from(8));
/// assert_eq!(result.regime, Regime::SemiOpen);
/// ```
pub fn calculate_dosimetry(input: &DosimetryInput) -> EngineResult<DosimetryResult> {
    validate(input)?;

    let min = input.crime.penalty_min;
    let max = input.crime.penalty_max;

    let phase1 = input.base_penalty;

    let net_circumstances =
        i64::from(input.aggravating_count) - i64::from(input.mitigating_count);
    let phase2 = phase1
        .checked_mul(Decimal::from(net_circumstances))
        .and_then(|v| v.checked_div(Decimal::from(CIRCUMSTANCE_DENOMINATOR)))
        .and_then(|shift| phase1.checked_add(shift))
        .ok_or_else(|| EngineError::invalid("base_penalty", "is too large"))?
        .clamp(min, max);

    let phase3 = input
        .increase_fraction
        .increase(phase2)
        .and_then(|increased| input.decrease_fraction.decrease(increased))
        .ok_or_else(|| EngineError::invalid("penalty_max", "is too large"))?;

    Ok(DosimetryResult {
        phase1,
        phase2,
        phase3,
        regime: regime_for(phase3),
    })
}

/// Initial regime for a final penalty in years.
pub fn regime_for(years: Decimal) -> Regime {
    if years > CLOSED_REGIME_THRESHOLD {
        Regime::Closed
    } else if years > SEMI_OPEN_REGIME_THRESHOLD {
        Regime::SemiOpen
    } else {
        Regime::Open
    }
}

fn validate(input: &DosimetryInput) -> EngineResult<()> {
    let crime = &input.crime;
    if crime.penalty_min < Decimal::ZERO {
        return Err(EngineError::invalid("penalty_min", "cannot be negative"));
    }
    if crime.penalty_min > crime.penalty_max {
        return Err(EngineError::invalid(
            "penalty_max",
            "must not be below the minimum penalty",
        ));
    }
    if input.base_penalty < crime.penalty_min || input.base_penalty > crime.penalty_max {
        return Err(EngineError::invalid(
            "base_penalty",
            format!(
                "must lie between {} and {} years",
                crime.penalty_min.normalize(),
                crime.penalty_max.normalize()
            ),
        ));
    }
    if input.decrease_fraction == LegalFraction::Whole {
        return Err(EngineError::invalid("decrease_fraction", "cannot be 1"));
    }
    Ok(())
}

/// Renders a penalty in years as Portuguese text for display.
///
/// Months are the fractional year times 12, rounded to the nearest month.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::format_years;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_years(Decimal::new(25, 1)), "2 ano(s) e 6 mês(es)");
/// assert_eq!(format_years(Decimal::new(25, 2)), "3 mês(es)");
/// assert_eq!(format_years(Decimal::ZERO), "0");
/// ```
pub fn format_years(years: Decimal) -> String {
    let mut whole = years.floor();
    let mut months = ((years - whole) * Decimal::from(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if months >= Decimal::from(12) {
        whole += Decimal::ONE;
        months -= Decimal::from(12);
    }

    let mut text = String::new();
    if whole > Decimal::ZERO {
        text.push_str(&format!("{} ano(s)", whole.normalize()));
    }
    if months > Decimal::ZERO {
        if !text.is_empty() {
            text.push_str(" e ");
        }
        text.push_str(&format!("{} mês(es)", months.normalize()));
    }
    if text.is_empty() {
        text.push('0');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrimeRecord;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input(min: &str, max: &str, base: &str) -> DosimetryInput {
        DosimetryInput {
            crime: CrimeRecord {
                penalty_min: dec(min),
                penalty_max: dec(max),
            },
            base_penalty: dec(base),
            aggravating_count: 0,
            mitigating_count: 0,
            increase_fraction: LegalFraction::Zero,
            decrease_fraction: LegalFraction::Zero,
        }
    }

    /// DS-001: no circumstances and no causes keeps the base penalty
    #[test]
    fn test_base_penalty_passes_through() {
        let result = calculate_dosimetry(&create_test_input("1", "4", "2")).unwrap();
        assert_eq!(result.phase1, dec("2"));
        assert_eq!(result.phase2, dec("2"));
        assert_eq!(result.phase3, dec("2"));
        assert_eq!(result.regime, Regime::Open);
    }

    /// DS-002: each aggravating circumstance adds 1/6 of the base
    #[test]
    fn test_aggravating_circumstances_add_one_sixth() {
        let mut input = create_test_input("6", "20", "6");
        input.aggravating_count = 2;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2, dec("8"));
    }

    /// DS-003: mitigating circumstances cannot go below the minimum
    #[test]
    fn test_mitigating_circumstances_clamped_at_minimum() {
        let mut input = create_test_input("6", "20", "6");
        input.mitigating_count = 3;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2, dec("6"));
    }

    /// DS-004: aggravating circumstances cannot go above the maximum
    #[test]
    fn test_aggravating_circumstances_clamped_at_maximum() {
        let mut input = create_test_input("6", "20", "18");
        input.aggravating_count = 5;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2, dec("20"));
    }

    #[test]
    fn test_circumstances_offset_each_other() {
        let mut input = create_test_input("4", "10", "6");
        input.aggravating_count = 2;
        input.mitigating_count = 1;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2, dec("7"));
    }

    /// DS-005: phase 3 doubles past the statutory maximum
    #[test]
    fn test_phase3_can_exceed_maximum() {
        let mut input = create_test_input("1", "4", "4");
        input.increase_fraction = LegalFraction::Whole;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2, dec("4"));
        assert_eq!(result.phase3, dec("8"));
        assert!(result.phase3 > input.crime.penalty_max);
        // exactly 8 years is not above 8
        assert_eq!(result.regime, Regime::SemiOpen);
    }

    #[test]
    fn test_phase3_above_eight_is_closed() {
        let mut input = create_test_input("2", "8", "5");
        input.increase_fraction = LegalFraction::Whole;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase3, dec("10"));
        assert_eq!(result.regime, Regime::Closed);
    }

    #[test]
    fn test_increase_applied_before_decrease() {
        let mut input = create_test_input("4", "10", "6");
        input.aggravating_count = 1;
        input.increase_fraction = LegalFraction::Half;
        input.decrease_fraction = LegalFraction::OneThird;

        // 7 × 3/2 = 10.5, then 10.5 × 2/3 = 7
        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2, dec("7"));
        assert_eq!(result.phase3, dec("7"));
        assert_eq!(result.regime, Regime::SemiOpen);
    }

    #[test]
    fn test_phase3_can_go_below_minimum() {
        let mut input = create_test_input("1", "4", "1");
        input.decrease_fraction = LegalFraction::TwoThirds;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase3.round_dp(6), dec("0.333333"));
        assert!(result.phase3 < input.crime.penalty_min);
        assert_eq!(result.regime, Regime::Open);
    }

    #[test]
    fn test_fractional_base_penalty() {
        let mut input = create_test_input("0.25", "1", "0.25");
        input.aggravating_count = 1;

        // 0.25 + 0.25/6
        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase2.round_dp(6), dec("0.291667"));
    }

    #[test]
    fn test_regime_boundaries() {
        assert_eq!(regime_for(dec("4")), Regime::Open);
        assert_eq!(regime_for(dec("4.01")), Regime::SemiOpen);
        assert_eq!(regime_for(dec("8")), Regime::SemiOpen);
        assert_eq!(regime_for(dec("8.01")), Regime::Closed);
        assert_eq!(regime_for(Decimal::ZERO), Regime::Open);
    }

    #[test]
    fn test_base_penalty_outside_range_is_rejected() {
        for base in ["0.5", "4.5"] {
            match calculate_dosimetry(&create_test_input("1", "4", base)) {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "base_penalty"),
                other => panic!("Expected InvalidInput error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        match calculate_dosimetry(&create_test_input("5", "2", "3")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "penalty_max"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_minimum_is_rejected() {
        assert!(matches!(
            calculate_dosimetry(&create_test_input("-1", "2", "0")),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_whole_decrease_is_rejected() {
        let mut input = create_test_input("1", "4", "2");
        input.decrease_fraction = LegalFraction::Whole;

        match calculate_dosimetry(&input) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "decrease_fraction")
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_phase3_overflow_is_rejected() {
        let mut input = create_test_input("1", "1", "1");
        input.crime.penalty_max = Decimal::MAX;
        input.base_penalty = Decimal::MAX;
        input.increase_fraction = LegalFraction::Whole;

        match calculate_dosimetry(&input) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "penalty_max");
                assert_eq!(message, "is too large");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_phase2_overflow_is_rejected() {
        let mut input = create_test_input("1", "1", "1");
        input.crime.penalty_max = Decimal::MAX;
        input.base_penalty = Decimal::MAX;
        input.aggravating_count = 6;

        assert!(matches!(
            calculate_dosimetry(&input),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_large_range_without_causes_passes_through() {
        let mut input = create_test_input("1", "1", "1");
        input.crime.penalty_max = Decimal::MAX;
        input.base_penalty = Decimal::MAX;

        let result = calculate_dosimetry(&input).unwrap();
        assert_eq!(result.phase3, Decimal::MAX);
        assert_eq!(result.regime, Regime::Closed);
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(dec("8")), "8 ano(s)");
        assert_eq!(format_years(dec("2.5")), "2 ano(s) e 6 mês(es)");
        assert_eq!(format_years(dec("0.25")), "3 mês(es)");
        assert_eq!(format_years(Decimal::ONE / Decimal::from(3)), "4 mês(es)");
        assert_eq!(format_years(Decimal::ZERO), "0");
    }

    #[test]
    fn test_format_years_carries_twelve_months() {
        assert_eq!(format_years(dec("2.99")), "3 ano(s)");
    }
}
