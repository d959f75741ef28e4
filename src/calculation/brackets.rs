//! Progressive bracket evaluation.
//!
//! Two table shapes are supported:
//!
//! - **Cumulative** ([`cumulative_progressive`]): each band's rate applies only
//!   to the slice of the base inside that band; the base is capped at the
//!   top band's upper bound. Used for the INSS contribution.
//! - **Single bracket** ([`single_bracket`]): one rate and one fixed deduction
//!   are chosen by the bracket the base falls in. Used for IRRF withholding.

use rust_decimal::Decimal;

use crate::config::{ContributionBand, WithholdingBracket, WithholdingTable};

/// Sums the contribution of every band up to the base.
///
/// Bases above the last band's `up_to` pay the ceiling value computed at
/// that bound. Bases at or below zero pay nothing.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::cumulative_progressive;
/// use legal_engine::config::TaxTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tables = TaxTables::reference_2024();
/// let inss = cumulative_progressive(Decimal::from_str("1412.00").unwrap(), &tables.inss);
/// assert_eq!(inss, Decimal::from_str("105.90").unwrap());
/// ```
pub fn cumulative_progressive(base: Decimal, bands: &[ContributionBand]) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for band in bands {
        if base <= lower {
            break;
        }
        total += band.rate * (base.min(band.up_to) - lower);
        lower = band.up_to;
    }

    total
}

/// Applies the bracket the base falls in: `base × rate − deduction`,
/// floored at zero.
///
/// A bracket matches when `base <= up_to`; the open bracket (`up_to` of
/// `None`) matches everything above the previous ones.
pub fn single_bracket(base: Decimal, brackets: &[WithholdingBracket]) -> Decimal {
    brackets
        .iter()
        .find(|b| b.up_to.is_none_or(|up_to| base <= up_to))
        .map(|b| (base * b.rate - b.deduction).max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// Withholding tax on `base` after the per-dependent deduction.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::withholding_tax;
/// use legal_engine::config::TaxTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tables = TaxTables::reference_2024();
/// let base = Decimal::from_str("3000.00").unwrap();
///
/// // 3000.00 × 15% − 381.44
/// assert_eq!(withholding_tax(base, 0, &tables.irrf), Decimal::from_str("68.56").unwrap());
///
/// // One dependent moves the base to 2810.41, in the 7.5% bracket
/// assert_eq!(withholding_tax(base, 1, &tables.irrf), Decimal::from_str("41.34075").unwrap());
/// ```
pub fn withholding_tax(base: Decimal, dependents: u32, table: &WithholdingTable) -> Decimal {
    let adjusted = base - Decimal::from(dependents) * table.dependent_deduction;
    single_bracket(adjusted, &table.brackets)
}
