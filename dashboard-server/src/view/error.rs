//! Transformation error types.
//!
//! A snapshot only fails to transform when a field the display cannot do
//! without is unusable. Missing optional data never produces an error.

use super::time::TimeError;

/// Errors from turning a snapshot into a view model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The snapshot timestamp could not be parsed
    #[error("snapshot time {value:?}: {source}")]
    InvalidSnapshotTime { value: String, source: TimeError },

    /// A service's scheduled departure is not "HH:MM"
    #[error("scheduled departure {value:?}: {source}")]
    InvalidDeparture { value: String, source: TimeError },

    /// A service lists no destination
    #[error("service departing {std} has no destination")]
    MissingDestination { std: String },

    /// Rolling a departure onto the next day overflowed the calendar
    #[error("departure {std} is out of the representable date range")]
    OutOfRange { std: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::time::parse_hhmm;

    #[test]
    fn error_display() {
        let err = TransformError::InvalidDeparture {
            value: "25:00".into(),
            source: parse_hhmm("25:00").unwrap_err(),
        };
        assert_eq!(
            err.to_string(),
            "scheduled departure \"25:00\": invalid time: hour must be 0-23"
        );

        let err = TransformError::MissingDestination { std: "10:15".into() };
        assert_eq!(err.to_string(), "service departing 10:15 has no destination");
    }
}
