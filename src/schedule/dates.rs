//! Period boundary date arithmetic
//!
//! All schedule dates derive from the disbursement date: period p falls
//! `p * frequency_months` calendar months after disbursement.

use chrono::{Datelike, Months, NaiveDate};

/// Date of a given period index (period 0 = disbursement date).
///
/// Calendar month arithmetic: the day-of-month is preserved where valid and
/// clamped to the last day of the target month otherwise (e.g. Jan 31 + 1
/// month = Feb 28/29).
pub fn period_date(start: NaiveDate, period: u32, frequency_months: u32) -> NaiveDate {
    start + Months::new(period * frequency_months)
}

/// Actual days between two dates (d2 - d1).
pub fn days_between(d1: NaiveDate, d2: NaiveDate) -> i64 {
    (d2 - d1).num_days()
}

/// Whole calendar months between two dates, ignoring day-of-month.
///
/// The ad-hoc amortization table keys on this offset, not on exact day
/// counts.
pub fn month_offset(start: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - start.year()) * 12 + (date.month() as i32 - start.month() as i32)
}
