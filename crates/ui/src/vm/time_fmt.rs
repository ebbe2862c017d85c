use chrono::{DateTime, Utc};

/// "1:05" style countdown for the question timer.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// "3m 39s" style elapsed reading for the results card.
#[must_use]
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y %H:%M").to_string()
}
