//! Request types for the legal engine API.
//!
//! Monetary amounts and penalties arrive as locale-formatted strings
//! (`"3.000,50"`) exactly as typed in the form. They are parsed into domain
//! records here, before any engine runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_count, parse_locale_decimal, parse_optional_locale_decimal};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ContractPeriod, CrimeRecord, DosimetryInput, LegalFraction, LimitationInput,
    TerminationReason,
};

/// Request body for the `/termination` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationRequest {
    /// First day of employment.
    pub admission_date: NaiveDate,
    /// Last day of employment.
    pub termination_date: NaiveDate,
    /// Monthly gross salary, locale formatted.
    pub gross_salary: String,
    /// FGTS balance, locale formatted. Blank or absent means unknown.
    #[serde(default)]
    pub fgts_balance: Option<String>,
    /// Number of dependents for IRRF. Absent means none.
    #[serde(default)]
    pub dependents: Option<String>,
    /// How the contract ended.
    pub termination_reason: TerminationReason,
    /// Whether a full vacation period is overdue.
    #[serde(default)]
    pub has_expired_vacation: bool,
}

impl TryFrom<TerminationRequest> for ContractPeriod {
    type Error = EngineError;

    fn try_from(req: TerminationRequest) -> EngineResult<Self> {
        let dependents = match req.dependents.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(text) => parse_count("dependents", text)?,
        };

        Ok(ContractPeriod {
            admission_date: req.admission_date,
            termination_date: req.termination_date,
            gross_salary: parse_locale_decimal("gross_salary", &req.gross_salary)?,
            dependents,
            fgts_balance: parse_optional_locale_decimal(
                "fgts_balance",
                req.fgts_balance.as_deref(),
            )?,
            termination_reason: req.termination_reason,
            has_expired_vacation: req.has_expired_vacation,
        })
    }
}

/// Request body for the `/dosimetry` endpoint.
///
/// The statutory range comes either from the catalog (`crime_id`) or from
/// `penalty_min` and `penalty_max`. When `base_penalty` is absent the
/// minimum penalty is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DosimetryRequest {
    /// Catalog id of the crime.
    #[serde(default)]
    pub crime_id: Option<String>,
    /// Statutory minimum in years, locale formatted.
    #[serde(default)]
    pub penalty_min: Option<String>,
    /// Statutory maximum in years, locale formatted.
    #[serde(default)]
    pub penalty_max: Option<String>,
    /// Base penalty in years, locale formatted.
    #[serde(default)]
    pub base_penalty: Option<String>,
    /// Number of aggravating circumstances.
    #[serde(default)]
    pub aggravating_count: i64,
    /// Number of mitigating circumstances.
    #[serde(default)]
    pub mitigating_count: i64,
    /// Cause of increase, one of `"0"`, `"1/6"`, `"1/3"`, `"1/2"`, `"2/3"`
    /// or `"1"`.
    #[serde(default)]
    pub increase_fraction: Option<String>,
    /// Cause of decrease, with the same literals.
    #[serde(default)]
    pub decrease_fraction: Option<String>,
}

impl DosimetryRequest {
    /// Resolves the statutory range and parses every field.
    ///
    /// Returns [`EngineError::CrimeNotFound`] for an unknown `crime_id`.
    pub fn resolve(&self, config: &ConfigLoader) -> EngineResult<DosimetryInput> {
        let crime = match self.crime_id.as_deref() {
            Some(id) => config.get_crime(id)?.record(),
            None => CrimeRecord {
                penalty_min: required_decimal("penalty_min", self.penalty_min.as_deref())?,
                penalty_max: required_decimal("penalty_max", self.penalty_max.as_deref())?,
            },
        };

        let base_penalty =
            parse_optional_locale_decimal("base_penalty", self.base_penalty.as_deref())?
                .unwrap_or(crime.penalty_min);

        Ok(DosimetryInput {
            crime,
            base_penalty,
            aggravating_count: circumstance_count("aggravating_count", self.aggravating_count)?,
            mitigating_count: circumstance_count("mitigating_count", self.mitigating_count)?,
            increase_fraction: fraction("increase_fraction", self.increase_fraction.as_deref())?,
            decrease_fraction: fraction("decrease_fraction", self.decrease_fraction.as_deref())?,
        })
    }
}

fn required_decimal(field: &str, text: Option<&str>) -> EngineResult<Decimal> {
    parse_optional_locale_decimal(field, text)?
        .ok_or_else(|| EngineError::invalid(field, "is required when crime_id is absent"))
}

/// An absent or blank fraction means no cause applies.
fn fraction(field: &str, text: Option<&str>) -> EngineResult<LegalFraction> {
    match text.map(str::trim) {
        None | Some("") => Ok(LegalFraction::Zero),
        Some(literal) => LegalFraction::from_literal(literal).ok_or_else(|| {
            EngineError::invalid(field, "must be one of 0, 1/6, 1/3, 1/2, 2/3 or 1")
        }),
    }
}

fn circumstance_count(field: &str, count: i64) -> EngineResult<u32> {
    if count < 0 {
        return Err(EngineError::invalid(field, "cannot be negative"));
    }
    u32::try_from(count).map_err(|_| EngineError::invalid(field, "is too large"))
}

/// Request body for the `/limitation` endpoint.
///
/// The prescription input is tagged by `kind`; `evaluation_date` defaults
/// to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitationRequest {
    /// The criminal or civil prescription input.
    #[serde(flatten)]
    pub input: LimitationInput,
    /// Date against which expiry is judged.
    #[serde(default)]
    pub evaluation_date: Option<NaiveDate>,
}

/// Query string for `GET /crimes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrimeQuery {
    /// Search term over crime name and article.
    #[serde(default)]
    pub q: Option<String>,
}
