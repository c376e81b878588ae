//! Calendar helpers for reporting and trading periods.
//!
//! A [`Period`] is a plain calendar date. Statement columns and price bars are
//! both keyed by it, which keeps period alignment a matter of equality.

use chrono::{Datelike, Months, NaiveDate, TimeDelta};

/// A calendar date identifying one reporting or trading period.
pub type Period = NaiveDate;

/// Last calendar day of the given month.
///
/// Returns `None` for months outside `1..=12` or years chrono cannot represent.
pub fn month_end(year: i32, month: u32) -> Option<Period> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
}

/// Month-end of the month lying `months_back` calendar months before `date`.
///
/// `months_back = 0` yields the end of `date`'s own month.
pub fn month_end_before(date: Period, months_back: u32) -> Option<Period> {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    let shifted = first.checked_sub_months(Months::new(months_back))?;
    month_end(shifted.year(), shifted.month())
}

/// First date of a trailing window of `days` calendar days ending at `today`.
///
/// A negative `days` means the whole history and yields `None`.
pub fn window_start(today: Period, days: i64) -> Option<Period> {
    if days < 0 {
        return None;
    }
    today.checked_sub_signed(TimeDelta::days(days))
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_period(s: &str) -> Option<Period> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
