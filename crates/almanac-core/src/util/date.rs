//! Date and datetime parsing for values read from the event store.
//!
//! ## Summary
//! Store values are ISO 8601 strings. Calendar dates are kept as timezone-naive
//! `NaiveDate`s; datetimes keep whatever UTC offset was stored, and values
//! stored without an offset are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::constants::ISO_DATE_FORMAT;
use crate::error::{CoreError, CoreResult};

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// ## Summary
/// Parses a calendar date such as `2024-01-31`.
///
/// A full datetime is also accepted; its date in the stored offset is used.
///
/// ## Errors
/// Returns `CoreError::ValidationError` if the value is neither a date nor a datetime.
pub fn parse_calendar_date(value: &str) -> CoreResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    parse_datetime(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_err| CoreError::ValidationError(format!("invalid calendar date: {value:?}")))
}

/// ## Summary
/// Parses an ISO 8601 datetime, keeping its UTC offset.
///
/// Offsetless datetimes are read as UTC; a bare date is read as midnight UTC.
///
/// ## Errors
/// Returns `CoreError::ValidationError` if no supported format matches.
pub fn parse_datetime(value: &str) -> CoreResult<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
        .map_err(|_err| CoreError::ValidationError(format!("invalid datetime: {value:?}")))
}
