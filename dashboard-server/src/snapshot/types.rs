//! Dashboard snapshot DTOs.
//!
//! These types map directly to the JSON served by the upstream data server's
//! `GET /get_dashboard_data`. The rail sections follow the National Rail
//! `GetDepartureBoard` shape and the weather section follows OpenWeather's
//! current-weather response. Only `time`, each service's `std` and
//! `destination`, and the three temperatures are required. Everything else
//! is `Option` and read leniently: a field that is missing, null or of an
//! unexpected shape reads as `None` instead of rejecting the snapshot.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional field, reading anything that does not fit `T` as
/// `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// The composite input for one transformation: a timestamp, two departure
/// boards and a weather reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was taken. The "now" for every derived label.
    pub time: String,

    /// Departure boards for both directions.
    pub rail: RailwayInformation,

    /// Current weather at the configured town.
    pub weather: WeatherData,

    /// Air quality readings. Carried through, never displayed.
    #[serde(default, deserialize_with = "lenient")]
    pub air_quality: Option<AirQualityData>,

    /// Indoor climate units. Carried through, never displayed.
    #[serde(default, deserialize_with = "lenient")]
    pub aircon: Option<Vec<AirconData>>,
}

/// Direction of travel for a departure board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Northbound,
    Southbound,
}

/// The pair of departure boards in a snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RailwayInformation {
    pub northbound: DeparturesResponse,
    pub southbound: DeparturesResponse,
}

impl RailwayInformation {
    /// Board for the given direction.
    pub fn board(&self, direction: Direction) -> &DeparturesResponse {
        match direction {
            Direction::Northbound => &self.northbound,
            Direction::Southbound => &self.southbound,
        }
    }
}

/// A departure board for one station, filtered towards one destination.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesResponse {
    /// When the board was generated (ISO 8601 datetime).
    #[serde(default, deserialize_with = "lenient")]
    pub generated_at: Option<String>,

    /// Human-readable name of the board station.
    #[serde(default, deserialize_with = "lenient")]
    pub location_name: Option<String>,

    /// CRS code of the board station.
    #[serde(default, deserialize_with = "lenient")]
    pub crs: Option<String>,

    /// Name of the station the board is filtered towards.
    #[serde(default, deserialize_with = "lenient")]
    pub filter_location_name: Option<String>,

    /// CRS code of the filter station.
    #[serde(default, rename = "filtercrs", deserialize_with = "lenient")]
    pub filter_crs: Option<String>,

    /// Filter direction ("to" or "from").
    #[serde(default, deserialize_with = "lenient")]
    pub filter_type: Option<String>,

    /// Disruption messages attached to the board.
    #[serde(default, deserialize_with = "lenient")]
    pub nrcc_messages: Option<BoardMessages>,

    #[serde(default, deserialize_with = "lenient")]
    pub platform_available: Option<bool>,

    /// False during major disruption.
    #[serde(default, deserialize_with = "lenient")]
    pub are_services_available: Option<bool>,

    /// Train services. Absent when nothing is scheduled.
    #[serde(default)]
    pub train_services: Option<TrainServices>,

    /// Bus replacement services, opaque.
    #[serde(default)]
    pub bus_services: Option<serde_json::Value>,

    /// Ferry services, opaque.
    #[serde(default)]
    pub ferry_services: Option<serde_json::Value>,
}

impl DeparturesResponse {
    /// Train services on the board, in upstream order.
    ///
    /// A missing `trainServices` object and a missing or null `service`
    /// list both read as no services.
    pub fn services(&self) -> &[Service] {
        self.train_services
            .as_ref()
            .and_then(|ts| ts.service.as_deref())
            .unwrap_or_default()
    }

    /// Text of the first disruption message, if any.
    pub fn first_message(&self) -> Option<&str> {
        match self.nrcc_messages.as_ref()? {
            BoardMessages::Text(text) => Some(text.as_str()),
            BoardMessages::Messages(messages) => messages.message.first()?.value.as_deref(),
        }
    }
}

/// Wrapper object around the service list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrainServices {
    #[serde(default, deserialize_with = "lenient")]
    pub service: Option<Vec<Service>>,
}

/// A service on the departure board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Scheduled time of arrival at the board station.
    #[serde(default, deserialize_with = "lenient")]
    pub sta: Option<String>,

    /// Estimated time of arrival at the board station.
    #[serde(default, deserialize_with = "lenient")]
    pub eta: Option<String>,

    /// Scheduled time of departure, "HH:MM".
    pub std: String,

    /// Estimated time of departure.
    /// May be "On time", "Delayed", "Cancelled", or a time like "10:15".
    #[serde(default, deserialize_with = "lenient")]
    pub etd: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub platform: Option<String>,

    /// Train operating company name.
    #[serde(default, deserialize_with = "lenient")]
    pub operator: Option<String>,

    /// Train operating company ATOC code.
    #[serde(default, deserialize_with = "lenient")]
    pub operator_code: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_circular_route: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_cancelled: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub filter_location_cancelled: Option<bool>,

    /// Service type ("train", "bus", "ferry").
    #[serde(default, deserialize_with = "lenient")]
    pub service_type: Option<String>,

    /// Train length in coaches.
    #[serde(default, deserialize_with = "lenient")]
    pub length: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub detach_front: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_reverse_formation: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub cancel_reason: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub delay_reason: Option<String>,

    /// Ephemeral Darwin service ID.
    #[serde(default, rename = "serviceID", deserialize_with = "lenient")]
    pub service_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub adhoc_alerts: Option<String>,

    /// Retail Service ID.
    #[serde(default, deserialize_with = "lenient")]
    pub rsid: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub origin: Option<Location>,

    /// Destination station(s). The first one is the display destination.
    pub destination: Location,

    #[serde(default, deserialize_with = "lenient")]
    pub current_origins: Option<Location>,

    #[serde(default, deserialize_with = "lenient")]
    pub current_destinations: Option<Location>,

    /// Loading and coach information.
    #[serde(default, deserialize_with = "lenient")]
    pub formation: Option<Formation>,
}

impl Service {
    /// Name of the first listed destination.
    pub fn destination_name(&self) -> Option<&str> {
        self.destination
            .location
            .first()
            .map(|l| l.location_name.as_str())
    }
}

/// Origins and destinations come wrapped in a list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Location {
    pub location: Vec<LocationDetails>,
}

/// An origin or destination station.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    /// Human-readable station name.
    pub location_name: String,

    /// CRS code.
    #[serde(default, deserialize_with = "lenient")]
    pub crs: Option<String>,

    /// "via" text (e.g., "via Bristol Parkway").
    #[serde(default, deserialize_with = "lenient")]
    pub via: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub future_change_to: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub assoc_is_cancelled: Option<bool>,
}

/// Train loading information.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    #[serde(default, deserialize_with = "lenient")]
    pub avg_loading: Option<i64>,

    /// Absent for some operators.
    #[serde(default, deserialize_with = "lenient")]
    pub coaches: Option<String>,
}

/// Disruption messages as they reach the board: the data server flattens
/// them to a single string, Darwin sends the structured list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoardMessages {
    Text(String),
    Messages(NrccMessages),
}

/// The disruption message list on a board.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NrccMessages {
    #[serde(default)]
    pub message: Vec<NrccMessage>,
}

/// A single disruption message. The content may contain HTML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NrccMessage {
    #[serde(default, rename = "_value_1", deserialize_with = "lenient")]
    pub value: Option<String>,
}

/// A point in time as sent upstream: unix seconds from OpenWeather, or an
/// ISO 8601 string once the data server has re-serialized it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Unix(i64),
    Iso(String),
}

/// Current weather for a town.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherData {
    #[serde(default, deserialize_with = "lenient")]
    pub coord: Option<Coordinates>,

    /// Weather conditions (e.g. "Clouds").
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<Vec<WeatherCondition>>,

    #[serde(default, deserialize_with = "lenient")]
    pub base: Option<String>,

    /// Temperature, pressure and humidity readings.
    pub main: MainReadings,

    #[serde(default, deserialize_with = "lenient")]
    pub visibility: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub wind: Option<Wind>,

    #[serde(default, deserialize_with = "lenient")]
    pub clouds: Option<Clouds>,

    #[serde(default, deserialize_with = "lenient")]
    pub dt: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient")]
    pub sys: Option<Sys>,

    /// Shift from UTC in seconds.
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,

    /// Town name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub cod: Option<i64>,
}

/// The readings block. Temperatures are in °C (metric units requested).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReadings {
    pub temp: f64,

    #[serde(default, deserialize_with = "lenient")]
    pub feels_like: Option<f64>,

    pub temp_min: f64,

    pub temp_max: f64,

    /// hPa.
    #[serde(default, deserialize_with = "lenient")]
    pub pressure: Option<i64>,

    /// Percent.
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub deg: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Clouds {
    pub all: i64,
}

/// Country and sunrise/sunset information.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sys {
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sunrise: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient")]
    pub sunset: Option<Timestamp>,
}

/// OpenWeather air pollution response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirQualityData {
    #[serde(default, deserialize_with = "lenient")]
    pub coord: Option<Coordinates>,
    #[serde(default)]
    pub list: Vec<AirQualityItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirQualityItem {
    #[serde(default, deserialize_with = "lenient")]
    pub dt: Option<Timestamp>,

    pub main: AirQualityIndex,

    /// Pollutant concentrations in μg/m³, keyed by pollutant (co, no2, pm2_5, ...).
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
}

/// Air Quality Index, 1 (good) to 5 (very poor).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirQualityIndex {
    pub aqi: i64,
}

/// An indoor air conditioning unit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirconData {
    pub name: String,
    pub temperature: AirconTemperature,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirconTemperature {
    pub indoor: f64,
    pub outdoor: f64,
}
