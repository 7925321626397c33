//! Snapshot source error types.

use std::fmt;
use std::path::PathBuf;

/// Errors from obtaining a snapshot.
#[derive(Debug)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Fixture file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Data server returned an error status code
    ApiError { status: u16, message: String },
}

impl SourceError {
    /// Wrap a serde error, keeping the start of the offending body.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        SourceError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Http(e) => write!(f, "HTTP error: {e}"),
            SourceError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            SourceError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            SourceError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Http(e) => Some(e),
            SourceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Http(err)
    }
}
