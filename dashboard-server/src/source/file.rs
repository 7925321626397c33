//! Static fixture source.
//!
//! Loads a snapshot from a JSON file on disk. Useful for development and
//! for running the dashboard without the upstream data server.

use std::path::PathBuf;

use crate::snapshot::SnapshotDocument;

use super::SnapshotSource;
use super::error::SourceError;

/// Snapshot source that reads a JSON file.
///
/// The file is re-read on every fetch, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<SnapshotDocument, SourceError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "loaded snapshot fixture");

        SnapshotDocument::from_json(&json).map_err(|e| SourceError::json(e, &json))
    }
}
