//! Time-until-departure labels.

use chrono::NaiveDateTime;

use crate::snapshot::Service;

use super::error::TransformError;
use super::time::{next_occurrence, parse_hhmm};

/// Minutes above which the label switches to hours and minutes.
const HOURS_THRESHOLD_MINS: i64 = 60;

/// Whole minutes from `now` until the service's scheduled departure.
///
/// The departure is taken on the same date as `now`, rolled to the next day
/// if already past, so the result is always within `0..=1439`.
pub fn minutes_until(service: &Service, now: NaiveDateTime) -> Result<i64, TransformError> {
    let std = parse_hhmm(&service.std).map_err(|source| TransformError::InvalidDeparture {
        value: service.std.clone(),
        source,
    })?;

    let departure = next_occurrence(std, now).ok_or_else(|| TransformError::OutOfRange {
        std: service.std.clone(),
    })?;

    // Non-negative, so truncation is the floor.
    Ok(departure.signed_duration_since(now).num_minutes())
}

/// Render a minute count as a delay label.
///
/// Over an hour reads `"1 HR 5 MINS"`; an hour or less reads `"60 MINS"`.
///
/// ```
/// use dashboard_server::view::format_delay;
///
/// assert_eq!(format_delay(15), "15 MINS");
/// assert_eq!(format_delay(60), "60 MINS");
/// assert_eq!(format_delay(61), "1 HR 1 MINS");
/// ```
pub fn format_delay(minutes: i64) -> String {
    if minutes > HOURS_THRESHOLD_MINS {
        format!("{} HR {} MINS", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} MINS")
    }
}

/// The delay label for a service as seen at `now`.
pub fn compute_delay(service: &Service, now: NaiveDateTime) -> Result<String, TransformError> {
    minutes_until(service, now).map(format_delay)
}
