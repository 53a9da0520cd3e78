//! Calendar-date normalization for release dates.
//!
//! The server may return plain dates (`1965-08-01`) or full timestamps
//! (`1965-08-01T00:00:00.000Z`). Both display and submission use the plain
//! `YYYY-MM-DD` form; timestamps are converted to UTC before the time-of-day
//! component is dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Format used for display and on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date or timestamp into a calendar date.
///
/// Returns `None` for empty or unparseable input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    // Timestamps without an offset are read as UTC
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|dt| dt.date())
        .ok()
}

/// Normalize a date string to `YYYY-MM-DD`, or an empty string when there is no usable date.
///
/// Idempotent: `format_date(&format_date(s)) == format_date(s)`.
pub fn format_date(input: &str) -> String {
    parse_date(input)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Serde helper: accept null, empty strings, dates and timestamps.
///
/// An unparseable value decodes as `None` rather than failing the whole record.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_date(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::warn!(value = %s, "Ignoring unparseable release date");
        }
        parsed
    }))
}
