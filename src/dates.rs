// Inclusive calendar date ranges, optionally weekdays only.

use chrono::{Datelike, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every date from `start` to `end` inclusive, in order. Saturdays and Sundays
/// are dropped when `skip_weekend` is set. Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate, skip_weekend: bool) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !(skip_weekend && is_weekend(*d)))
        .collect()
}
