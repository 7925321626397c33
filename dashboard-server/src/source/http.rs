//! HTTP snapshot source.
//!
//! Fetches the snapshot from the upstream data server, which assembles it
//! from National Rail and OpenWeather on each request.

use std::time::Duration;

use crate::snapshot::SnapshotDocument;

use super::SnapshotSource;
use super::error::SourceError;

/// Path of the snapshot endpoint on the data server.
const SNAPSHOT_PATH: &str = "/get_dashboard_data";

/// Default base URL for the data server.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Base URL of the data server
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpSourceConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the snapshot endpoint.
    pub fn snapshot_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SNAPSHOT_PATH)
    }
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Snapshot source backed by the data server's JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    http: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    /// Create a new HTTP source with the given configuration.
    pub fn new(config: HttpSourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.snapshot_url(),
        })
    }
}

impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<SnapshotDocument, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        tracing::debug!(url = %self.url, bytes = body.len(), "fetched snapshot");

        SnapshotDocument::from_json(&body).map_err(|e| SourceError::json(e, &body))
    }
}
