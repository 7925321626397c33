//! Snapshot to view model transformation.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::snapshot::{DeparturesResponse, Direction, Service, Snapshot};

use super::delay::compute_delay;
use super::error::TransformError;
use super::format::{DisplayFormat, celsius};
use super::notice::board_notice;
use super::time::parse_instant;

/// One line of a departure list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainRow {
    /// Scheduled departure, "HH:MM".
    pub time: String,

    /// First listed destination.
    pub destination: String,

    /// Estimated departure as given upstream ("On time", "Delayed", "10:17").
    pub status: String,

    /// Time until departure, e.g. "15 MINS".
    pub delay: String,
}

/// Everything the dashboard displays, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub current_time: String,
    pub current_day: String,
    pub current_date: String,

    pub northbound_trains: Vec<TrainRow>,
    pub southbound_trains: Vec<TrainRow>,

    /// Set only when there are no northbound trains.
    pub northbound_notice: Option<String>,
    /// Set only when there are no southbound trains.
    pub southbound_notice: Option<String>,

    pub current_temperature: String,
    pub min_temperature: String,
    pub max_temperature: String,
}

impl ViewModel {
    /// Rows for one direction.
    pub fn trains(&self, direction: Direction) -> &[TrainRow] {
        match direction {
            Direction::Northbound => &self.northbound_trains,
            Direction::Southbound => &self.southbound_trains,
        }
    }
}

/// Derive the view model for a snapshot.
///
/// Pure: the same snapshot always yields the same view model. Fails only
/// when the timestamp, or a service's `std` or destination, is unusable.
pub fn transform(snapshot: &Snapshot) -> Result<ViewModel, TransformError> {
    let now =
        parse_instant(&snapshot.time).map_err(|source| TransformError::InvalidSnapshotTime {
            value: snapshot.time.clone(),
            source,
        })?;

    let northbound = snapshot.rail.board(Direction::Northbound);
    let southbound = snapshot.rail.board(Direction::Southbound);

    let northbound_trains = train_rows(northbound, now)?;
    let southbound_trains = train_rows(southbound, now)?;

    let main = &snapshot.weather.main;

    Ok(ViewModel {
        current_time: DisplayFormat::Clock.render(now),
        current_day: DisplayFormat::WeekdayShort.render(now),
        current_date: DisplayFormat::DayMonthShort.render(now),
        northbound_notice: notice_if_empty(northbound, &northbound_trains),
        southbound_notice: notice_if_empty(southbound, &southbound_trains),
        northbound_trains,
        southbound_trains,
        current_temperature: celsius(main.temp),
        min_temperature: celsius(main.temp_min),
        max_temperature: celsius(main.temp_max),
    })
}

/// Rows for every train on a board, in board order.
pub fn train_rows(
    board: &DeparturesResponse,
    now: NaiveDateTime,
) -> Result<Vec<TrainRow>, TransformError> {
    board
        .services()
        .iter()
        .map(|service| train_row(service, now))
        .collect()
}

fn train_row(service: &Service, now: NaiveDateTime) -> Result<TrainRow, TransformError> {
    let destination =
        service
            .destination_name()
            .ok_or_else(|| TransformError::MissingDestination {
                std: service.std.clone(),
            })?;

    Ok(TrainRow {
        time: service.std.clone(),
        destination: destination.to_string(),
        status: service.etd.clone().unwrap_or_default(),
        delay: compute_delay(service, now)?,
    })
}

fn notice_if_empty(board: &DeparturesResponse, rows: &[TrainRow]) -> Option<String> {
    rows.is_empty().then(|| board_notice(board))
}
