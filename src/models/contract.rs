//! Employment contract model for the termination calculator.
//!
//! This module defines the [`ContractPeriod`] input record, the
//! [`TerminationReason`] enum, and the [`TerminationResult`] produced from
//! them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the employment relationship ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Dismissal by the employer without cause.
    WithoutCause,
    /// The employee resigned.
    Resignation,
    /// Dismissal by the employer for just cause.
    JustCause,
    /// Termination by mutual agreement.
    MutualAgreement,
}

impl TerminationReason {
    /// Returns the wire literal for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::WithoutCause => "without_cause",
            TerminationReason::Resignation => "resignation",
            TerminationReason::JustCause => "just_cause",
            TerminationReason::MutualAgreement => "mutual_agreement",
        }
    }
}

/// The employment period being terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPeriod {
    /// First day of employment.
    pub admission_date: NaiveDate,
    /// Last day of employment; must not precede `admission_date`.
    pub termination_date: NaiveDate,
    /// Monthly gross salary; must be positive.
    pub gross_salary: Decimal,
    /// Number of dependents declared for income tax.
    pub dependents: u32,
    /// Current FGTS balance, if known.
    #[serde(default)]
    pub fgts_balance: Option<Decimal>,
    /// Why the contract ended.
    pub termination_reason: TerminationReason,
    /// Whether a full vacation period is already overdue.
    #[serde(default)]
    pub has_expired_vacation: bool,
}

/// Length of service under the 365-day year / 30-day month approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// Whole years of 365 days.
    pub years: i64,
    /// Whole months of 30 days after the years.
    pub months: i64,
    /// Remaining days.
    pub days: i64,
}

/// Every earning and deduction line of a termination settlement.
///
/// All amounts are unrounded decimals in the salary's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationResult {
    /// Salary for the days worked in the final month.
    pub balance_of_salary: Decimal,
    /// Number of notice days the notice amount was computed on.
    pub notice_days: i64,
    /// Indemnified notice period.
    pub notice_period: Decimal,
    /// Months counted towards the proportional 13th salary.
    pub thirteenth_months: i64,
    /// Proportional 13th salary.
    pub proportional_thirteenth: Decimal,
    /// Months counted towards proportional vacation.
    pub vacation_months: i64,
    /// Proportional vacation.
    pub proportional_vacation: Decimal,
    /// One-third bonus on proportional vacation.
    pub vacation_bonus: Decimal,
    /// Overdue vacation.
    pub expired_vacation: Decimal,
    /// One-third bonus on overdue vacation.
    pub expired_vacation_bonus: Decimal,
    /// 40% penalty on the FGTS balance.
    pub fgts_penalty: Decimal,
    /// Social-security contribution withheld.
    pub inss: Decimal,
    /// Income tax withheld.
    pub irrf: Decimal,
    /// Sum of all earning lines.
    pub total_gross: Decimal,
    /// Sum of all deduction lines.
    pub total_deductions: Decimal,
    /// `total_gross - total_deductions`.
    pub total_net: Decimal,
    /// Length of service.
    pub tenure: Tenure,
}
