//! Server configuration.
//!
//! Read from `DASHBOARD_*` environment variables by the binary. The core
//! transformation takes no configuration at all.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::source::{CacheConfig, HttpSourceConfig};

/// Default listen address.
const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// A JSON fixture on disk
    File(PathBuf),
    /// The upstream data server
    Http(HttpSourceConfig),
}

/// Configuration for the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: SocketAddr,
    /// Snapshot source
    pub source: SourceConfig,
    /// Snapshot cache settings
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Create a config for the given source with default bind and cache.
    pub fn new(source: SourceConfig) -> Self {
        Self {
            bind: SocketAddr::from(DEFAULT_BIND),
            source,
            cache: CacheConfig::default(),
        }
    }

    /// Set the listen address.
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Set the snapshot cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = CacheConfig::new(ttl);
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// - `DASHBOARD_SOURCE_FILE`: fixture path; wins over the URL
    /// - `DASHBOARD_SOURCE_URL`: data server base URL
    /// - `DASHBOARD_TIMEOUT_SECS`: data server request timeout
    /// - `DASHBOARD_BIND`: listen address
    /// - `DASHBOARD_CACHE_TTL_SECS`: how long a snapshot is reused
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source = match lookup("DASHBOARD_SOURCE_FILE") {
            Some(path) => SourceConfig::File(PathBuf::from(path)),
            None => {
                let http = match lookup("DASHBOARD_SOURCE_URL") {
                    Some(url) => HttpSourceConfig::new(url),
                    None => HttpSourceConfig::default(),
                };
                let http = match parse_var(&lookup, "DASHBOARD_TIMEOUT_SECS")? {
                    Some(secs) => http.with_timeout(secs),
                    None => http,
                };
                SourceConfig::Http(http)
            }
        };

        let mut config = Self::new(source);

        if let Some(bind) = parse_var(&lookup, "DASHBOARD_BIND")? {
            config = config.with_bind(bind);
        }

        if let Some(secs) = parse_var(&lookup, "DASHBOARD_CACHE_TTL_SECS")? {
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}
