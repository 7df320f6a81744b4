//! Date helpers for the statistics period defaults.

use chrono::{Datelike, NaiveDate};

/// Formats a date the way the backend and the bookmarks expect, `yyyy-mm-dd`.
pub fn to_swedish_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `yyyy-mm-dd` date, `None` when the text is not a valid date.
pub fn parse_swedish_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// First and last day of the calendar month before the month of `today`.
pub fn previous_month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_of_current =
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let last_of_previous = first_of_current.pred_opt().unwrap_or(first_of_current);
    let first_of_previous =
        NaiveDate::from_ymd_opt(last_of_previous.year(), last_of_previous.month(), 1)
            .unwrap_or(last_of_previous);
    (first_of_previous, last_of_previous)
}
