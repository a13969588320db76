//! Group Module
//!
//! A named cache namespace that serves keys cache-aside: from the local
//! store when resident, otherwise from its loader.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, CacheStore, EvictionCallback};
use crate::error::{CacheError, Result};
use crate::group::Loader;

// == Group ==
/// Cache namespace pairing one [`CacheStore`] with one [`Loader`].
///
/// Concurrent misses for the same key are not coalesced: each caller runs
/// the loader and the last `add` to reach the store wins. Failed loads are
/// never cached.
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    cache: CacheStore,
    loads: AtomicU64,
    load_errors: AtomicU64,
}

impl Group {
    // == Constructor ==
    /// Creates a group whose store is built on the first load.
    ///
    /// # Arguments
    /// * `name` - Namespace identity
    /// * `max_bytes` - Byte budget of the store, 0 for unbounded
    /// * `loader` - Data source consulted on misses
    /// * `on_evict` - Optional callback for entries evicted from the store
    pub fn new(
        name: impl Into<String>,
        max_bytes: usize,
        loader: Arc<dyn Loader>,
        on_evict: Option<EvictionCallback<ByteView>>,
    ) -> Self {
        Self {
            name: name.into(),
            loader,
            cache: CacheStore::with_eviction(max_bytes, on_evict),
            loads: AtomicU64::new(0),
            load_errors: AtomicU64::new(0),
        }
    }

    /// Returns the group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // == Get ==
    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// An empty key is rejected before the cache is consulted.
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("key is required".to_string()));
        }

        if let Some(value) = self.cache.get(key) {
            debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        debug!(group = %self.name, key, "cache miss");
        self.load(key)
    }

    // == Load ==
    /// Runs the loader for `key` and populates the cache with the result.
    ///
    /// No cache lock is held while the loader runs. On failure the loader's
    /// error is returned as-is and nothing is stored. An empty key is
    /// rejected, since no lookup could ever reach an entry stored under it.
    pub fn load(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("key is required".to_string()));
        }

        let bytes = match self.loader.load(key) {
            Ok(bytes) => bytes,
            Err(source) => {
                self.load_errors.fetch_add(1, Ordering::Relaxed);
                warn!(group = %self.name, key, error = %source, "load failed");
                return Err(CacheError::Load {
                    key: key.to_string(),
                    source,
                });
            }
        };
        self.loads.fetch_add(1, Ordering::Relaxed);

        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        debug!(group = %self.name, key, bytes = value.len(), "populating cache");
        self.cache.add(key, value);
    }

    // == Stats ==
    /// Returns store statistics together with the group's load counters.
    ///
    /// The store itself never sees the loader, so `loads` and `load_errors`
    /// are only filled in here.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.cache.stats();
        stats.loads = self.loads.load(Ordering::Relaxed);
        stats.load_errors = self.load_errors.load(Ordering::Relaxed);
        stats
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
