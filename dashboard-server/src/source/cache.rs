//! Caching layer for snapshot sources.
//!
//! The data server calls National Rail and OpenWeather on every request, so
//! repeated dashboard refreshes within a short window reuse the last
//! snapshot instead. Only successful fetches are cached; failures are handed
//! straight back to the caller.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::snapshot::SnapshotDocument;

use super::SnapshotSource;
use super::error::SourceError;

/// Configuration for the snapshot cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a fetched snapshot is served before refetching.
    pub ttl: Duration,
}

impl CacheConfig {
    /// Create a config with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
        }
    }
}

/// Snapshot source with caching.
///
/// Wraps any [`SnapshotSource`] and serves its last snapshot until the TTL
/// elapses.
pub struct CachedSnapshotSource<S> {
    inner: S,
    cache: MokaCache<(), Arc<SnapshotDocument>>,
}

impl<S: SnapshotSource> CachedSnapshotSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { inner, cache }
    }

    /// Drop the cached snapshot so the next fetch goes upstream.
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }
}

impl<S: SnapshotSource> SnapshotSource for CachedSnapshotSource<S> {
    async fn fetch(&self) -> Result<SnapshotDocument, SourceError> {
        if let Some(cached) = self.cache.get(&()).await {
            tracing::trace!("snapshot cache hit");
            return Ok(SnapshotDocument::clone(&cached));
        }

        let document = self.inner.fetch().await?;
        self.cache.insert((), Arc::new(document.clone())).await;

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts fetches and stamps each snapshot with the count.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CountingSource {
        /// The source and a handle on its fetch count.
        fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                calls: Arc::clone(&calls),
                fail,
            };
            (source, calls)
        }
    }

    fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    impl SnapshotSource for CountingSource {
        async fn fetch(&self) -> Result<SnapshotDocument, SourceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(SourceError::ApiError {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            let json = serde_json::json!({
                "time": format!("2024-03-01T10:0{n}:00Z"),
                "rail": {"northbound": {}, "southbound": {}},
                "weather": {"main": {"temp": 1, "temp_min": 0, "temp_max": 2}}
            });
            Ok(SnapshotDocument::from_value(json).unwrap())
        }
    }

    #[test]
    fn default_config() {
        assert_eq!(CacheConfig::default().ttl, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn reuses_snapshot_within_ttl() {
        let (source, counter) = CountingSource::new(false);
        let cached = CachedSnapshotSource::new(source, &CacheConfig::default());

        let first = cached.fetch().await.unwrap();
        let second = cached.fetch().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.snapshot().time, "2024-03-01T10:01:00Z");
        assert_eq!(calls(&counter), 1);
    }

    #[tokio::test]
    async fn refetches_after_ttl() {
        let config = CacheConfig::new(Duration::from_millis(50));
        let (source, counter) = CountingSource::new(false);
        let cached = CachedSnapshotSource::new(source, &config);

        cached.fetch().await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        let later = cached.fetch().await.unwrap();

        assert_eq!(later.snapshot().time, "2024-03-01T10:02:00Z");
        assert_eq!(calls(&counter), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let (source, counter) = CountingSource::new(false);
        let cached = CachedSnapshotSource::new(source, &CacheConfig::default());

        cached.fetch().await.unwrap();
        cached.invalidate().await;
        cached.fetch().await.unwrap();

        assert_eq!(calls(&counter), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let (source, counter) = CountingSource::new(true);
        let cached = CachedSnapshotSource::new(source, &CacheConfig::default());

        assert!(cached.fetch().await.is_err());
        assert!(cached.fetch().await.is_err());
        assert_eq!(calls(&counter), 2);
    }
}
