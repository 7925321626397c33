//! Dashboard snapshot model.
//!
//! A snapshot is everything the dashboard shows at one instant: the time it
//! was taken, the departure boards for both directions of travel, and the
//! current weather. It is produced by the upstream data server and consumed
//! read-only by [`crate::view::transform`].

mod document;
mod types;

pub use document::SnapshotDocument;
pub use types::{
    AirQualityData, AirQualityIndex, AirQualityItem, AirconData, AirconTemperature,
    BoardMessages, Clouds, Coordinates, DeparturesResponse, Direction, Formation, Location,
    LocationDetails, MainReadings, NrccMessage, NrccMessages, RailwayInformation, Service,
    Snapshot, Sys, Timestamp, TrainServices, WeatherCondition, WeatherData, Wind,
};
