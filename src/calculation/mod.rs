//! Calculation logic for the legal computation engines.
//!
//! This module contains the three engines (termination settlement, sentence
//! dosimetry and limitation deadlines) together with the primitives they
//! share: calendar arithmetic, progressive bracket evaluation and parsing of
//! locale-formatted numbers.

mod brackets;
mod date_arithmetic;
mod dosimetry;
mod limitation;
mod locale;
mod termination;

pub use brackets::{cumulative_progressive, single_bracket, withholding_tax};
pub use date_arithmetic::{
    ROUND_UP_FROM_DAY, add_months, add_years, anniversary_on_or_before, days_between,
    months_elapsed, tenure, whole_months_between,
};
pub use dosimetry::{
    CIRCUMSTANCE_DENOMINATOR, CLOSED_REGIME_THRESHOLD, SEMI_OPEN_REGIME_THRESHOLD,
    calculate_dosimetry, format_years, regime_for,
};
pub use limitation::{CIVIL_TERM_YEARS, calculate_limitation, criminal_period_years};
pub use locale::{format_brl, parse_count, parse_locale_decimal, parse_optional_locale_decimal};
pub use termination::{
    FGTS_DEPOSIT_RATE, FGTS_PENALTY_RATE, MAX_AMOUNT, NOTICE_BASE_DAYS, NOTICE_DAYS_PER_YEAR,
    NOTICE_MAX_DAYS, VACATION_MAX_MONTHS, calculate_termination,
};
