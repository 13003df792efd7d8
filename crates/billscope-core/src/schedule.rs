//! Due-date prediction
//!
//! Advances a bill's last-paid date by one billing period and aligns the
//! result to the bill's typical day-of-month.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::Cadence;

/// Predict the next due date after `last_paid`
///
/// Month-based cadences advance by calendar months (or a year) and then snap
/// the day-of-month to `typical_day`, clamped to the last valid day of the
/// landing month: typical day 31 in February 2024 lands on the 29th.
/// Weekly/biweekly advance by a fixed 7/14 days; the day count already
/// determines the date, so no snap applies. A variable cadence gives no
/// prediction.
pub fn next_due_date(last_paid: NaiveDate, cadence: Cadence, typical_day: u32) -> Option<NaiveDate> {
    match cadence {
        Cadence::Weekly => Some(last_paid + Duration::days(7)),
        Cadence::Biweekly => Some(last_paid + Duration::days(14)),
        Cadence::Monthly => snap_day(last_paid.checked_add_months(Months::new(1))?, typical_day),
        Cadence::Quarterly => snap_day(last_paid.checked_add_months(Months::new(3))?, typical_day),
        Cadence::Annual => snap_day(last_paid.checked_add_months(Months::new(12))?, typical_day),
        Cadence::Variable => None,
    }
}

/// Move a date to `day`, clamped to the last valid day of its month
fn snap_day(date: NaiveDate, day: u32) -> Option<NaiveDate> {
    let clamped = day.clamp(1, days_in_month(date.year(), date.month()));
    date.with_day(clamped)
}

/// Number of days in a calendar month
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// First and last day of the calendar month containing `date`, inclusive
pub fn month_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = date.year();
    let month = date.month();
    let start = date.with_day(1).unwrap_or(date);
    let end = date
        .with_day(days_in_month(year, month))
        .unwrap_or(date);
    (start, end)
}
