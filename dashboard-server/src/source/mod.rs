//! Snapshot sources.
//!
//! A source obtains a [`SnapshotDocument`] from somewhere outside the
//! process: a JSON fixture on disk, or the upstream data server over HTTP.
//! Sources never transform; callers hand the snapshot to
//! [`crate::view::transform`] themselves.

mod cache;
mod error;
mod file;
mod http;

use std::future::Future;

use crate::snapshot::SnapshotDocument;

pub use cache::{CacheConfig, CachedSnapshotSource};
pub use error::SourceError;
pub use file::FileSnapshotSource;
pub use http::{HttpSnapshotSource, HttpSourceConfig};

/// Trait for obtaining snapshots.
///
/// This abstraction lets the web layer be tested against fixtures.
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current snapshot.
    fn fetch(&self) -> impl Future<Output = Result<SnapshotDocument, SourceError>> + Send;
}
