//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};

use crate::utils::errors::{ParseError, ParseResult};

/// Convert Meetup epoch milliseconds to a UTC timestamp
///
/// Sub-second precision is discarded, matching how the catalog stores all
/// remote timestamps.
pub fn datetime_from_millis(entity: &'static str, millis: i64) -> ParseResult<DateTime<Utc>> {
    let secs = millis / 1000;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or(ParseError::TimeOutOfRange { entity, millis })
}

/// Convert Meetup millisecond durations and offsets to whole seconds
pub fn seconds_from_millis(millis: i64) -> i64 {
    millis / 1000
}

/// Format a timestamp as the date-only cursor the events feed accepts
pub fn format_date_cursor(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}
