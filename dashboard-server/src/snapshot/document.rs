//! A snapshot paired with the JSON it was read from.

use serde::Deserialize;
use serde_json::Value;

use super::types::Snapshot;

/// A parsed snapshot and the exact JSON document it came from.
///
/// The typed [`Snapshot`] drives the view model. The raw document is what
/// `/get_dashboard_data` serves back, so keys this crate does not model and
/// the upstream number formatting survive the trip.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDocument {
    raw: Value,
    snapshot: Snapshot,
}

impl SnapshotDocument {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_str(json)?;
        Self::from_value(raw)
    }

    /// Interpret an already-parsed JSON value.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let snapshot = Snapshot::deserialize(&raw)?;
        Ok(Self { raw, snapshot })
    }

    /// The typed snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The document as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}
