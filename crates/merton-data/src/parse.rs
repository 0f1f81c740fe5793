//! Field parsing shared by the loaders.

use chrono::NaiveDateTime;
use merton_traits::Date;

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`, dropping any time of day.
#[must_use]
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();
    Date::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parse an observation value.
///
/// Empty cells and `.` are published-but-missing values and yield `Ok(None)`.
/// Anything else that is not a number is an error.
pub fn parse_value(text: &str) -> Result<Option<f64>, String> {
    let text = text.trim();
    if text.is_empty() || text == "." {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("value '{text}' is not a number"))
}
