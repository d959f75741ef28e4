//! Severance pay calculation.
//!
//! This module computes every line of a labor-termination settlement from a
//! [`ContractPeriod`]. Each line is computed independently from the
//! validated input:
//!
//! | Line | Formula | Paid when |
//! |------|---------|-----------|
//! | Balance of salary | salary / 30 × day of termination | always |
//! | Notice period | salary / 30 × min(30 + 3 × years, 90) | without cause |
//! | 13th salary | salary / 12 × months since Jan 1 | always |
//! | Vacation | salary / 12 × months since anniversary (max 12), + 1/3 | not just cause |
//! | Expired vacation | salary + 1/3 | flagged and not just cause |
//! | FGTS penalty | 40% of balance (or 8% × salary × months) | without cause |
//!
//! INSS and IRRF are withheld from the balance of salary and the 13th salary
//! only, each computed separately and summed.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::TaxTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{ContractPeriod, TerminationReason, TerminationResult};

use super::brackets::{cumulative_progressive, withholding_tax};
use super::date_arithmetic::{
    ROUND_UP_FROM_DAY, anniversary_on_or_before, months_elapsed, tenure, whole_months_between,
};

/// Notice days every dismissed employee is entitled to.
pub const NOTICE_BASE_DAYS: i64 = 30;

/// Extra notice days per full year of service.
pub const NOTICE_DAYS_PER_YEAR: i64 = 3;

/// Upper limit on notice days.
pub const NOTICE_MAX_DAYS: i64 = 90;

/// Maximum months of proportional vacation.
pub const VACATION_MAX_MONTHS: i64 = 12;

/// Monthly FGTS deposit rate used to estimate an unknown balance (8%).
pub const FGTS_DEPOSIT_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// FGTS penalty rate on dismissal without cause (40%).
pub const FGTS_PENALTY_RATE: Decimal = Decimal::from_parts(40, 0, 0, false, 2);

/// Largest salary or FGTS balance accepted, one trillion reais.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

const DAYS_PER_SALARY: i64 = 30;
const MONTHS_PER_YEAR: i64 = 12;

/// Calculates the full termination settlement.
///
/// # Arguments
///
/// * `contract` - The employment period being terminated
/// * `tables` - INSS and IRRF tables in force
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the termination date precedes
/// the admission date, the salary is not positive, the FGTS balance is
/// negative, or either amount exceeds [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::calculate_termination;
/// use legal_engine::config::TaxTables;
/// use legal_engine::models::{ContractPeriod, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = ContractPeriod {
///     admission_date: NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
///     gross_salary: Decimal::from(3000),
///     dependents: 0,
///     fgts_balance: None,
///     termination_reason: TerminationReason::WithoutCause,
///     has_expired_vacation: false,
/// };
///
/// let result = calculate_termination(&contract, &TaxTables::reference_2024()).unwrap();
///
/// // Two full years of service: 30 + 3 × 2 = 36 notice days
/// assert_eq!(result.notice_days, 36);
/// assert_eq!(result.notice_period, Decimal::from(3600));
/// ```
pub fn calculate_termination(
    contract: &ContractPeriod,
    tables: &TaxTables,
) -> EngineResult<TerminationResult> {
    validate(contract)?;

    let salary = contract.gross_salary;
    let admission = contract.admission_date;
    let termination = contract.termination_date;
    let reason = contract.termination_reason;
    let service = tenure(admission, termination);

    let balance_of_salary =
        salary * Decimal::from(termination.day()) / Decimal::from(DAYS_PER_SALARY);

    let (notice_days, notice_period) = if reason == TerminationReason::WithoutCause {
        let days = (NOTICE_BASE_DAYS + NOTICE_DAYS_PER_YEAR * service.years).min(NOTICE_MAX_DAYS);
        (days, salary * Decimal::from(days) / Decimal::from(DAYS_PER_SALARY))
    } else {
        (0, Decimal::ZERO)
    };

    let year_start = NaiveDate::from_ymd_opt(termination.year(), 1, 1)
        .ok_or_else(|| EngineError::invalid("termination_date", "date out of range"))?;
    let thirteenth_months = months_elapsed(year_start, termination, ROUND_UP_FROM_DAY);
    let proportional_thirteenth = monthly_fraction(salary, thirteenth_months);

    let anniversary = anniversary_on_or_before(admission, termination)
        .ok_or_else(|| EngineError::invalid("admission_date", "date out of range"))?;
    let vacation_months =
        months_elapsed(anniversary, termination, ROUND_UP_FROM_DAY).min(VACATION_MAX_MONTHS);
    let proportional_vacation = if reason == TerminationReason::JustCause {
        Decimal::ZERO
    } else {
        monthly_fraction(salary, vacation_months)
    };
    let vacation_bonus = proportional_vacation / Decimal::from(3);

    let (expired_vacation, expired_vacation_bonus) =
        if contract.has_expired_vacation && reason != TerminationReason::JustCause {
            (salary, salary / Decimal::from(3))
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

    let fgts_penalty = if reason == TerminationReason::WithoutCause {
        fgts_penalty(contract)
    } else {
        Decimal::ZERO
    };

    let inss_on_balance = cumulative_progressive(balance_of_salary, &tables.inss);
    let inss_on_thirteenth = cumulative_progressive(proportional_thirteenth, &tables.inss);
    let inss = inss_on_balance + inss_on_thirteenth;

    let irrf = withholding_tax(
        balance_of_salary - inss_on_balance,
        contract.dependents,
        &tables.irrf,
    ) + withholding_tax(
        proportional_thirteenth - inss_on_thirteenth,
        contract.dependents,
        &tables.irrf,
    );

    let total_gross = balance_of_salary
        + notice_period
        + proportional_thirteenth
        + proportional_vacation
        + vacation_bonus
        + expired_vacation
        + expired_vacation_bonus
        + fgts_penalty;
    let total_deductions = inss + irrf;

    Ok(TerminationResult {
        balance_of_salary,
        notice_days,
        notice_period,
        thirteenth_months,
        proportional_thirteenth,
        vacation_months,
        proportional_vacation,
        vacation_bonus,
        expired_vacation,
        expired_vacation_bonus,
        fgts_penalty,
        inss,
        irrf,
        total_gross,
        total_deductions,
        total_net: total_gross - total_deductions,
        tenure: service,
    })
}

fn validate(contract: &ContractPeriod) -> EngineResult<()> {
    if contract.termination_date < contract.admission_date {
        return Err(EngineError::invalid(
            "termination_date",
            "must not be before the admission date",
        ));
    }
    if contract.gross_salary <= Decimal::ZERO {
        return Err(EngineError::invalid("gross_salary", "must be positive"));
    }
    if contract.gross_salary > MAX_AMOUNT {
        return Err(EngineError::invalid("gross_salary", "is too large"));
    }
    if contract.fgts_balance.is_some_and(|b| b < Decimal::ZERO) {
        return Err(EngineError::invalid("fgts_balance", "cannot be negative"));
    }
    if contract.fgts_balance.is_some_and(|b| b > MAX_AMOUNT) {
        return Err(EngineError::invalid("fgts_balance", "is too large"));
    }
    Ok(())
}

/// `salary / 12 × months`.
fn monthly_fraction(salary: Decimal, months: i64) -> Decimal {
    salary * Decimal::from(months) / Decimal::from(MONTHS_PER_YEAR)
}

/// 40% of the known FGTS balance, or of an estimate built from 8% of the
/// salary for each whole month worked. A zero balance counts as unknown.
fn fgts_penalty(contract: &ContractPeriod) -> Decimal {
    match contract.fgts_balance {
        Some(balance) if balance > Decimal::ZERO => balance * FGTS_PENALTY_RATE,
        _ => {
            let months = whole_months_between(contract.admission_date, contract.termination_date);
            Decimal::from(months) * contract.gross_salary * FGTS_DEPOSIT_RATE * FGTS_PENALTY_RATE
        }
    }
}
