//! Time parsing for snapshots and departure boards.
//!
//! Snapshot timestamps arrive as ISO 8601 strings, with or without an
//! offset. Departure boards give times as "HH:MM" with no date. Everything
//! here works on the wall clock as written: a timestamp of `10:00+01:00`
//! is ten o'clock, whatever the host timezone.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a snapshot timestamp into its wall-clock datetime.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`, `2024-03-01T10:00:00+01:00`)
/// and naive ISO 8601 with optional fractional seconds
/// (`2024-03-01T10:00:00.123456`). An offset, if present, is kept as the
/// local context rather than converted away.
///
/// # Examples
///
/// ```
/// use dashboard_server::view::parse_instant;
///
/// let now = parse_instant("2024-03-01T23:30:00+01:00").unwrap();
/// assert_eq!(now.to_string(), "2024-03-01 23:30:00");
///
/// let now = parse_instant("2024-03-01T10:00:00.123456").unwrap();
/// assert_eq!(now.format("%H:%M").to_string(), "10:00");
///
/// assert!(parse_instant("yesterday").is_err());
/// ```
pub fn parse_instant(s: &str) -> Result<NaiveDateTime, TimeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    s.parse::<NaiveDateTime>()
        .map_err(|_| TimeError::new("expected an ISO 8601 datetime"))
}

/// Parse a board time in "HH:MM" format.
///
/// # Examples
///
/// ```
/// use dashboard_server::view::parse_hhmm;
///
/// // Valid times
/// assert!(parse_hhmm("00:00").is_ok());
/// assert!(parse_hhmm("23:59").is_ok());
///
/// // Invalid formats
/// assert!(parse_hhmm("1430").is_err());
/// assert!(parse_hhmm("14:3").is_err());
/// assert!(parse_hhmm("25:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    // Must be exactly 5 characters: HH:MM
    if s.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    let bytes = s.as_bytes();

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// The first moment at or after `now` whose time of day is `time`.
///
/// The candidate is `time` on the same date as `now`; if that is strictly
/// earlier than `now` it moves forward exactly one day. A service at
/// "00:10" seen at 23:55 therefore lands on tomorrow.
///
/// Returns `None` only if the date would overflow.
pub fn next_occurrence(time: NaiveTime, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let candidate = now.date().and_time(time);
    if candidate < now {
        candidate.checked_add_signed(Duration::days(1))
    } else {
        Some(candidate)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
