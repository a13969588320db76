//! Cache Store Module
//!
//! Thread-safe wrapper serializing access to one LRU engine behind a mutex.

use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{ByteView, CacheStats, EvictionCallback, LruCache};

struct Inner {
    /// Created on the first add
    lru: Option<LruCache<ByteView>>,
    /// Handed to the engine when it is created
    on_evict: Option<EvictionCallback<ByteView>>,
    stats: CacheStats,
}

// == Cache Store ==
/// Mutex-guarded, lazily initialized LRU cache of [`ByteView`] values.
///
/// Each call holds the lock for exactly one engine operation, eviction
/// callbacks included. A callback must never call back into the same store.
pub struct CacheStore {
    max_bytes: usize,
    inner: Mutex<Inner>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store whose engine will be bounded by `max_bytes` (0 = unbounded).
    pub fn new(max_bytes: usize) -> Self {
        Self::with_eviction(max_bytes, None)
    }

    /// Creates a store that forwards evicted entries to `on_evict`.
    pub fn with_eviction(max_bytes: usize, on_evict: Option<EvictionCallback<ByteView>>) -> Self {
        Self {
            max_bytes,
            inner: Mutex::new(Inner {
                lru: None,
                on_evict,
                stats: CacheStats::new(),
            }),
        }
    }

    // == Get ==
    /// Looks up `key`, promoting it on a hit.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut inner = self.inner.lock();
        let Inner { lru, stats, .. } = &mut *inner;

        let found = lru.as_mut().and_then(|lru| lru.get(key).cloned());
        match found {
            Some(_) => stats.record_hit(),
            None => stats.record_miss(),
        }
        found
    }

    // == Add ==
    /// Stores `value` under `key`, creating the engine on first use.
    pub fn add(&self, key: impl Into<String>, value: ByteView) {
        let mut inner = self.inner.lock();
        let Inner {
            lru,
            on_evict,
            stats,
        } = &mut *inner;

        let lru = lru.get_or_insert_with(|| {
            debug!(max_bytes = self.max_bytes, "initializing lru engine");
            LruCache::new(self.max_bytes, on_evict.take())
        });

        let evicted = lru.add(key, value);
        if evicted > 0 {
            debug!(evicted, used_bytes = lru.used_bytes(), "evicted entries");
        }
        stats.record_evictions(evicted);
        stats.set_occupancy(lru.len(), lru.used_bytes());
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().lru.as_ref().map_or(0, LruCache::len)
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.inner
            .lock()
            .lru
            .as_ref()
            .map_or(0, LruCache::used_bytes)
    }

    /// Configured byte ceiling (0 = unbounded).
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats.clone()
    }
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("CacheStore")
            .field("max_bytes", &self.max_bytes)
            .field("lru", &inner.lru)
            .field("stats", &inner.stats)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_store_new_is_lazy() {
        let store = CacheStore::new(64);
        assert!(store.inner.lock().lru.is_none());
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.used_bytes(), 0);
        assert_eq!(store.max_bytes(), 64);
    }

    #[test]
    fn test_store_get_before_first_add_misses() {
        let store = CacheStore::new(64);

        assert!(store.get("key1").is_none());
        assert!(store.inner.lock().lru.is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_add_and_get() {
        let store = CacheStore::new(0);

        store.add("key1", ByteView::from("value1"));

        assert_eq!(store.get("key1"), Some(ByteView::from("value1")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn test_store_applies_configured_budget() {
        let store = CacheStore::new(20);

        store.add("key1", ByteView::from("value1"));
        store.add("key2", ByteView::from("value2"));
        store.add("k3", ByteView::from("v3"));

        assert!(store.get("key1").is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_forwards_evictions() {
        let evicted = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let store = CacheStore::with_eviction(
            10,
            Some(Box::new(move |key: &str, value: &ByteView| {
                sink.lock().push((key.to_string(), value.text()));
            })),
        );

        store.add("key1", ByteView::from("123456"));
        store.add("k2", ByteView::from("k2"));

        assert_eq!(
            *evicted.lock(),
            vec![("key1".to_string(), "123456".to_string())]
        );
    }

    #[test]
    fn test_store_stats() {
        let store = CacheStore::new(0);

        store.add("key1", ByteView::from("value1"));
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.used_bytes, 10);
    }

    #[test]
    fn test_store_concurrent_adds_keep_accounting() {
        let store = Arc::new(CacheStore::new(0));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("t{}-k{:03}", t, i);
                        store.add(key.clone(), ByteView::from("v"));
                        assert!(store.get(&key).is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // every key is 7 bytes, every value 1 byte
        assert_eq!(store.len(), 800);
        assert_eq!(store.used_bytes(), 800 * 8);
        assert_eq!(store.stats().hits, 800);
    }
}
