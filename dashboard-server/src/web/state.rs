//! Application state for the web layer.

use std::sync::Arc;

/// Shared application state.
///
/// Holds the snapshot source every request fetches from.
pub struct AppState<S> {
    /// Snapshot source, usually cached
    pub source: Arc<S>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

// Manual impl: S itself need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}
