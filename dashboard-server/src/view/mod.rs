//! Display view model.
//!
//! Turns a [`Snapshot`](crate::snapshot::Snapshot) into the strings the
//! dashboard shows: the clock and date header, a list of departures per
//! direction with a time-until-departure label, and the temperatures.
//!
//! Key characteristics:
//! - Pure and synchronous: no I/O, no shared state, safe to call from any
//!   number of tasks at once
//! - Times are wall-clock: the snapshot's own offset is the local context,
//!   and nothing depends on the host timezone or locale
//! - A missing service list is an empty list, never an error

mod delay;
mod error;
mod format;
mod notice;
mod time;
mod transform;

pub use delay::{compute_delay, format_delay, minutes_until};
pub use error::TransformError;
pub use format::{DisplayFormat, celsius};
pub use notice::{NO_SCHEDULED_TRAINS, board_notice};
pub use time::{TimeError, next_occurrence, parse_hhmm, parse_instant};
pub use transform::{TrainRow, ViewModel, train_rows, transform};
