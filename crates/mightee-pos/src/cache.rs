//! # Snapshot Cache
//!
//! Caches display snapshots between reruns so redisplaying the sheets
//! does not re-issue every remote read.
//!
//! ## Invalidation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Cache Lifecycle                            │
//! │                                                                         │
//! │  report::today_inventory ──miss──► remote reads ──► put("inventory")    │
//! │  report::today_inventory ──hit───► cached snapshot, zero remote calls   │
//! │                                                                         │
//! │  complete_checkout / save_stock_edits / undo_entry                      │
//! │        └────────────► invalidate() - EVERYTHING drops                   │
//! │                                                                         │
//! │  Time-unbounded: entries live until the next write, however long        │
//! │  that takes. Keys are reader names, one entry per reader.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Session-scoped cache of display snapshots, keyed by reader name.
///
/// Snapshots are stored as JSON values, the same shape the rendering
/// layer consumes, so any serializable view can be cached.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    inner: Mutex<HashMap<String, serde_json::Value>>,
}

impl SnapshotCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches a cached snapshot, if one is present and still decodes.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let inner = self.inner.lock().expect("snapshot cache mutex poisoned");
        let value = inner.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Stores a snapshot under a reader name.
    pub fn put<T: Serialize>(&self, key: &str, snapshot: &T) {
        if let Ok(value) = serde_json::to_value(snapshot) {
            let mut inner = self.inner.lock().expect("snapshot cache mutex poisoned");
            inner.insert(key.to_string(), value);
        }
    }

    /// Drops every snapshot. Called after any remote write.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().expect("snapshot cache mutex poisoned");
        if !inner.is_empty() {
            debug!(entries = inner.len(), "Snapshot cache invalidated");
        }
        inner.clear();
    }
}
