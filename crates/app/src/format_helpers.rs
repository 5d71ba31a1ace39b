//! Shared formatting utilities for the UI layer.

use chrono::{NaiveDate, NaiveDateTime};

/// "Feb 6, 2026".
pub fn format_date_human(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Feb 6, 2026 9:05 AM".
pub fn format_datetime_human(datetime: NaiveDateTime) -> String {
    datetime.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Percentage with up to two decimals and a trailing `%`: "87.5%", "100%".
pub fn format_percentage(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}%")
}

/// Parse the value of an `<input type="date">`; empty or invalid gives `None`.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
