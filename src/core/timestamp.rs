//! Timestamp conversion and rendering.
//!
//! Raw timestamps are epoch milliseconds. They are floored to whole seconds
//! and converted to a naive wall-clock instant in the configured
//! [`TimeZoneMode`]; all range comparisons happen on those naive instants.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::TimeZoneMode;
use crate::error::{Result, SmsFilterError};

/// Second-precision format used in every artifact.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a raw timestamp cell as epoch milliseconds.
pub fn parse_millis(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Converts epoch milliseconds to a wall-clock instant.
///
/// Returns `None` if the value is outside chrono's representable range.
pub fn millis_to_datetime(millis: i64, timezone: TimeZoneMode) -> Option<NaiveDateTime> {
    let utc = DateTime::from_timestamp(millis.div_euclid(1000), 0)?;
    Some(match timezone {
        TimeZoneMode::Local => utc.with_timezone(&chrono::Local).naive_local(),
        TimeZoneMode::Utc => utc.naive_utc(),
    })
}

/// Renders an instant as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(OUTPUT_TIMESTAMP_FORMAT).to_string()
}

/// Renders an instant with a user-supplied date format.
///
/// # Errors
///
/// Returns [`SmsFilterError::InvalidConfig`] if the format cannot render.
pub fn format_date_label(instant: NaiveDateTime, format: &str) -> Result<String> {
    let mut label = String::new();
    write!(label, "{}", instant.format(format)).map_err(|_| {
        SmsFilterError::invalid_config("date_format", format!("cannot render '{format}'"))
    })?;
    Ok(label)
}

/// Parses a date label back into an instant.
///
/// Formats that carry a time of day parse to that time; date-only formats
/// parse to midnight.
///
/// # Errors
///
/// Returns [`SmsFilterError::InvalidDate`] if the label does not match.
pub fn parse_date_label(label: &str, format: &str) -> Result<NaiveDateTime> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(label, format) {
        return Ok(instant);
    }

    NaiveDate::parse_from_str(label, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SmsFilterError::invalid_date(label, format))
}

/// Moves an instant to 23:59:59 of its calendar day.
pub fn end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_hms_opt(23, 59, 59).unwrap_or(instant)
}
