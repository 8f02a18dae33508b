//! Wall-clock input handling and display formatting.
//!
//! Forms submit a calendar date and two times of day with no zone. They are
//! read under a single fixed UTC offset (`+05:30` unless configured
//! otherwise) and stored as UTC instants.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::errors::{SchedulingError, SchedulingResult};

/// Offset applied to submitted wall-clock times when none is configured.
pub const DEFAULT_INPUT_OFFSET: &str = "+05:30";

/// Parses a `±HH:MM` offset such as `+05:30` or `-04:00`.
pub fn parse_offset(value: &str) -> SchedulingResult<FixedOffset> {
    let invalid = || SchedulingError::Validation(format!("Invalid UTC offset: {}", value));
    let value = value.trim();

    let (sign, rest) = match value.chars().next() {
        Some('+') => (1, &value[1..]),
        Some('-') => (-1, &value[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn parse_time_of_day(value: &str) -> SchedulingResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| SchedulingError::Validation(format!("Invalid time: {}", value)))
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM[:SS]` time read at `offset`
/// into a UTC instant.
pub fn compose(date: &str, time_of_day: &str, offset: FixedOffset) -> SchedulingResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| SchedulingError::Validation(format!("Invalid date: {}", date.trim())))?;
    let time = parse_time_of_day(time_of_day)?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| SchedulingError::Validation("Invalid date and time".to_string()))
}

/// Renders an instant as RFC 3339 in UTC, e.g. `2024-05-01T04:30:00Z`.
pub fn display_utc(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
