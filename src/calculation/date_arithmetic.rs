//! Calendar and tenure arithmetic shared by the engines.
//!
//! ## Approximations
//!
//! Tenure uses a fixed 365-day year and 30-day month, not calendar-exact
//! boundaries. Month counting for proportional entitlements adds one month
//! when the final date falls on or after the 15th.
//!
//! ## Overflow
//!
//! Adding years or months keeps the day of month. When that day does not
//! exist in the target month the excess days carry into the following
//! month, so Feb 29 plus one year is Mar 1.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::Tenure;

/// Day of month from which a partial month counts as a whole month.
pub const ROUND_UP_FROM_DAY: u32 = 15;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

/// Absolute number of whole days between two dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Decomposes the days between two dates into 365-day years, 30-day months
/// and remaining days.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::tenure;
/// use chrono::NaiveDate;
///
/// let admission = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let termination = NaiveDate::from_ymd_opt(2021, 3, 5).unwrap();
///
/// // 429 days: 1 year, 2 months of 30 days, 4 days
/// let t = tenure(admission, termination);
/// assert_eq!((t.years, t.months, t.days), (1, 2, 4));
/// ```
pub fn tenure(admission: NaiveDate, termination: NaiveDate) -> Tenure {
    let total_days = days_between(admission, termination);
    let remainder = total_days % DAYS_PER_YEAR;

    Tenure {
        years: total_days / DAYS_PER_YEAR,
        months: remainder / DAYS_PER_MONTH,
        days: remainder % DAYS_PER_MONTH,
    }
}

/// Difference in calendar months between two dates, ignoring the day.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year() - from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

/// Calendar months between two dates, plus one when `to` falls on or after
/// `round_up_from_day`.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::{ROUND_UP_FROM_DAY, months_elapsed};
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let before = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
/// assert_eq!(months_elapsed(from, before, ROUND_UP_FROM_DAY), 2);
///
/// let after = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(months_elapsed(from, after, ROUND_UP_FROM_DAY), 3);
/// ```
pub fn months_elapsed(from: NaiveDate, to: NaiveDate, round_up_from_day: u32) -> i64 {
    let bonus = if to.day() >= round_up_from_day { 1 } else { 0 };
    whole_months_between(from, to) + bonus
}

/// Adds calendar months, carrying overflowing days into the next month.
///
/// Returns `None` only when the result leaves the supported date range.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date.year().checked_mul(12)? + date.month0() as i32;
    let target = total.checked_add(months)?;
    let first =
        NaiveDate::from_ymd_opt(target.div_euclid(12), target.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// Adds calendar years, keeping month and day.
///
/// Feb 29 into a non-leap year rolls forward to Mar 1.
///
/// # Examples
///
/// ```
/// use legal_engine::calculation::add_years;
/// use chrono::NaiveDate;
///
/// let leap_day = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
/// assert_eq!(add_years(leap_day, 1), NaiveDate::from_ymd_opt(2021, 3, 1));
/// assert_eq!(add_years(leap_day, 4), NaiveDate::from_ymd_opt(2024, 2, 29));
/// ```
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

/// The most recent anniversary of `admission` on or before `reference`.
///
/// When the anniversary in the reference year is still ahead, the previous
/// year's anniversary is returned.
pub fn anniversary_on_or_before(admission: NaiveDate, reference: NaiveDate) -> Option<NaiveDate> {
    let years = reference.year() - admission.year();
    let candidate = add_years(admission, years)?;
    if candidate > reference {
        add_years(admission, years - 1)
    } else {
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_is_absolute() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 31)), 30);
        assert_eq!(days_between(date(2024, 1, 31), date(2024, 1, 1)), 30);
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_days_between_spans_leap_day() {
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2023, 2, 28), date(2023, 3, 1)), 1);
    }

    #[test]
    fn test_tenure_uses_365_30_approximation() {
        // 2022-01-10 to 2024-03-20 is 800 days: 2 × 365 + 70 → 2y 2m 10d
        let t = tenure(date(2022, 1, 10), date(2024, 3, 20));
        assert_eq!(t, Tenure { years: 2, months: 2, days: 10 });
    }

    #[test]
    fn test_tenure_leap_year_is_not_a_whole_year() {
        // 366 days in 2024 → 1 year and 1 day under the approximation
        let t = tenure(date(2024, 1, 1), date(2025, 1, 1));
        assert_eq!(t, Tenure { years: 1, months: 0, days: 1 });
    }

    #[test]
    fn test_tenure_same_day_is_zero() {
        let t = tenure(date(2024, 5, 5), date(2024, 5, 5));
        assert_eq!(t, Tenure { years: 0, months: 0, days: 0 });
    }

    #[test]
    fn test_whole_months_between_ignores_day() {
        assert_eq!(whole_months_between(date(2022, 1, 31), date(2024, 3, 1)), 26);
        assert_eq!(whole_months_between(date(2024, 3, 1), date(2024, 3, 31)), 0);
    }

    #[test]
    fn test_months_elapsed_rounds_up_from_15th() {
        let from = date(2024, 1, 1);
        assert_eq!(months_elapsed(from, date(2024, 1, 14), ROUND_UP_FROM_DAY), 0);
        assert_eq!(months_elapsed(from, date(2024, 1, 15), ROUND_UP_FROM_DAY), 1);
        assert_eq!(months_elapsed(from, date(2024, 12, 31), ROUND_UP_FROM_DAY), 12);
    }

    #[test]
    fn test_months_elapsed_custom_threshold() {
        let from = date(2024, 1, 1);
        assert_eq!(months_elapsed(from, date(2024, 2, 10), 10), 2);
        assert_eq!(months_elapsed(from, date(2024, 2, 9), 10), 1);
    }

    #[test]
    fn test_add_years_preserves_month_and_day() {
        assert_eq!(add_years(date(2010, 1, 1), 12), Some(date(2022, 1, 1)));
        assert_eq!(add_years(date(2019, 7, 31), 3), Some(date(2022, 7, 31)));
    }

    #[test]
    fn test_add_years_leap_day_rolls_to_march_first() {
        assert_eq!(add_years(date(2020, 2, 29), 1), Some(date(2021, 3, 1)));
        assert_eq!(add_years(date(2020, 2, 29), 3), Some(date(2023, 3, 1)));
        assert_eq!(add_years(date(2020, 2, 29), 8), Some(date(2028, 2, 29)));
    }

    #[test]
    fn test_add_years_negative() {
        assert_eq!(add_years(date(2024, 6, 10), -1), Some(date(2023, 6, 10)));
    }

    #[test]
    fn test_add_months_carries_overflowing_days() {
        assert_eq!(add_months(date(2023, 1, 31), 1), Some(date(2023, 3, 3)));
        assert_eq!(add_months(date(2020, 1, 1), 18), Some(date(2021, 7, 1)));
        assert_eq!(add_months(date(2020, 11, 15), 2), Some(date(2021, 1, 15)));
    }

    #[test]
    fn test_anniversary_this_year() {
        assert_eq!(
            anniversary_on_or_before(date(2022, 1, 10), date(2024, 3, 20)),
            Some(date(2024, 1, 10))
        );
    }

    #[test]
    fn test_anniversary_previous_year() {
        assert_eq!(
            anniversary_on_or_before(date(2022, 6, 1), date(2024, 3, 20)),
            Some(date(2023, 6, 1))
        );
    }

    #[test]
    fn test_anniversary_on_the_reference_date() {
        assert_eq!(
            anniversary_on_or_before(date(2022, 3, 20), date(2024, 3, 20)),
            Some(date(2024, 3, 20))
        );
    }

    #[test]
    fn test_anniversary_within_first_year() {
        assert_eq!(
            anniversary_on_or_before(date(2023, 11, 1), date(2024, 1, 20)),
            Some(date(2023, 11, 1))
        );
    }
}
