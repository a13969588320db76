//! LRU Engine Module
//!
//! Byte-bounded least-recently-used cache. Entries live in an arena of
//! index-addressed nodes linked into a recency list:
//! - Front (head) = Most recently used
//! - Back (tail) = Least recently used
//!
//! The engine performs no locking; see [`CacheStore`](crate::cache::CacheStore)
//! for the synchronized wrapper.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::cache::Sizeable;

// == Eviction Callback ==
/// Invoked once per evicted entry, after the entry is no longer reachable.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V) + Send>;

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Cache ==
/// Recency-ordered cache bounded by a byte budget.
///
/// Every resident entry is charged `key.len() + value.size()` bytes. A
/// `max_bytes` of zero disables eviction entirely.
pub struct LruCache<V> {
    /// Byte ceiling, 0 = unbounded
    max_bytes: usize,
    /// Running total of charged bytes
    used_bytes: usize,
    /// Node arena, `None` marks a free slot
    slots: Vec<Option<Node<V>>>,
    /// Reusable slot indices
    free: Vec<usize>,
    /// Key to slot index
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evict: Option<EvictionCallback<V>>,
}

impl<V: Sizeable> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte ceiling, 0 for no limit
    /// * `on_evict` - Optional callback fired for each evicted entry
    pub fn new(max_bytes: usize, on_evict: Option<EvictionCallback<V>>) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            on_evict,
        }
    }

    // == Add ==
    /// Inserts or replaces the value for `key` and marks it most recently used.
    ///
    /// Evicts from the back until the byte budget is respected again and
    /// returns how many entries were evicted by this call. An entry larger
    /// than the whole budget evicts everything, itself included.
    pub fn add(&mut self, key: impl Into<String>, value: V) -> usize {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            self.promote(idx);
            if let Some(node) = self.slots[idx].as_mut() {
                let old = std::mem::replace(&mut node.value, value);
                self.used_bytes = self.used_bytes - old.size() + node.value.size();
            }
        } else {
            self.used_bytes += key.len() + value.size();
            let idx = self.alloc(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.index.insert(key, idx);
            self.attach_front(idx);
        }

        let mut evicted = 0;
        while self.max_bytes != 0 && self.used_bytes > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    // == Get ==
    /// Looks up `key`, promoting it to most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry.
    ///
    /// The eviction callback runs after the entry has been unlinked and its
    /// bytes released. Returns `None` when the cache is empty.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let idx = self.tail?;
        let node = self.release(idx)?;
        self.index.remove(&node.key);
        self.used_bytes -= node.key.len() + node.value.size();
        trace!(key = %node.key, used_bytes = self.used_bytes, "evicted oldest entry");

        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(&node.key, &node.value);
        }
        Some((node.key, node.value))
    }

    // == Remove ==
    /// Removes `key` without treating it as an eviction (no callback).
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        let node = self.release(idx)?;
        self.used_bytes -= node.key.len() + node.value.size();
        Some(node.value)
    }

    // == Contains ==
    /// Checks residency without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.head, move |&idx| {
            self.slots[idx].as_ref().and_then(|node| node.next)
        })
        .filter_map(move |idx| self.slots[idx].as_ref().map(|node| node.key.as_str()))
    }

    // == Length ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Configured byte ceiling (0 = unbounded).
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    // == Arena Plumbing ==

    fn alloc(&mut self, node: Node<V>) -> usize {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    fn release(&mut self, idx: usize) -> Option<Node<V>> {
        self.detach(idx);
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        Some(node)
    }

    fn promote(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.slots.get(idx).and_then(Option::as_ref) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            if let Some(node) = self.slots[h].as_mut() {
                node.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.index.len())
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn unbounded() -> LruCache<String> {
        LruCache::new(0, None)
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, EvictionCallback<String>) {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let callback: EvictionCallback<String> = Box::new(move |key: &str, _value: &String| {
            sink.lock().push(key.to_string());
        });
        (evicted, callback)
    }

    #[test]
    fn test_lru_new() {
        let lru = unbounded();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.used_bytes(), 0);
    }

    #[test]
    fn test_lru_get_hit_and_miss() {
        let mut lru = unbounded();
        lru.add("key1", "1234".to_string());

        assert_eq!(lru.get("key1"), Some(&"1234".to_string()));
        assert_eq!(lru.get("key2"), None);
    }

    #[test]
    fn test_lru_remove_oldest_on_overflow() {
        let (k1, k2, k3) = ("key1", "key2", "k3");
        let (v1, v2, v3) = ("value1", "value2", "v3");
        let capacity = k1.len() + k2.len() + v1.len() + v2.len();
        let mut lru = LruCache::new(capacity, None);

        lru.add(k1, v1.to_string());
        lru.add(k2, v2.to_string());
        lru.add(k3, v3.to_string());

        assert!(lru.get("key1").is_none());
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_eviction_callback_order() {
        let (evicted, callback) = recorder();
        let mut lru = LruCache::new(10, Some(callback));

        assert_eq!(lru.add("key1", "123456".to_string()), 0);
        assert_eq!(lru.add("k2", "k2".to_string()), 1);
        assert_eq!(lru.add("k3", "k3".to_string()), 0);
        assert_eq!(lru.add("k4", "k4".to_string()), 1);

        assert_eq!(*evicted.lock(), vec!["key1".to_string(), "k2".to_string()]);
        assert_eq!(lru.used_bytes(), 8);
    }

    #[test]
    fn test_lru_update_adjusts_bytes() {
        let mut lru = unbounded();

        lru.add("key", "1".to_string());
        lru.add("key", "111".to_string());

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.used_bytes(), "key".len() + "111".len());
        assert_eq!(lru.get("key"), Some(&"111".to_string()));
    }

    #[test]
    fn test_lru_update_shrinks_bytes() {
        let mut lru = unbounded();

        lru.add("key", "123456".to_string());
        lru.add("key", "1".to_string());

        assert_eq!(lru.used_bytes(), 4);
    }

    #[test]
    fn test_lru_get_promotes() {
        let (evicted, callback) = recorder();
        // room for exactly three 4-byte entries
        let mut lru = LruCache::new(12, Some(callback));

        lru.add("a1", "v1".to_string());
        lru.add("b1", "v1".to_string());
        lru.add("c1", "v1".to_string());

        // touch a1 so b1 becomes the oldest
        assert!(lru.get("a1").is_some());
        lru.add("d1", "v1".to_string());

        assert_eq!(*evicted.lock(), vec!["b1".to_string()]);
        assert!(lru.contains("a1"));
        assert!(!lru.contains("b1"));
    }

    #[test]
    fn test_lru_readd_promotes_without_growing() {
        let mut lru = unbounded();

        lru.add("a", "1".to_string());
        lru.add("b", "2".to_string());
        lru.add("c", "3".to_string());
        lru.add("a", "9".to_string());

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.keys().collect::<Vec<_>>(), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = unbounded();

        lru.add("a", String::new());
        lru.add("b", String::new());
        lru.add("c", String::new());

        lru.get("a");
        lru.get("c");
        lru.get("b");

        // front=[b, c, a]=back
        assert_eq!(lru.remove_oldest().map(|(k, _)| k), Some("a".to_string()));
        assert_eq!(lru.remove_oldest().map(|(k, _)| k), Some("c".to_string()));
        assert_eq!(lru.remove_oldest().map(|(k, _)| k), Some("b".to_string()));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove_oldest_empty() {
        let (evicted, callback) = recorder();
        let mut lru = LruCache::new(0, Some(callback));

        assert!(lru.remove_oldest().is_none());
        assert!(evicted.lock().is_empty());
    }

    #[test]
    fn test_lru_callback_sees_entry_already_removed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: EvictionCallback<String> = Box::new(move |key: &str, value: &String| {
            sink.lock().push((key.to_string(), value.clone()));
        });
        let mut lru = LruCache::new(0, Some(callback));
        lru.add("key1", "value1".to_string());

        let removed = lru.remove_oldest();

        assert_eq!(removed, Some(("key1".to_string(), "value1".to_string())));
        assert_eq!(*seen.lock(), vec![("key1".to_string(), "value1".to_string())]);
        assert_eq!(lru.used_bytes(), 0);
        assert!(lru.get("key1").is_none());
    }

    #[test]
    fn test_lru_oversized_entry_evicts_everything() {
        let mut lru = LruCache::new(8, None);

        lru.add("a", "1".to_string());
        let evicted = lru.add("big", "0123456789".to_string());

        assert_eq!(evicted, 2);
        assert!(lru.is_empty());
        assert_eq!(lru.used_bytes(), 0);
    }

    #[test]
    fn test_lru_unbounded_never_evicts() {
        let mut lru = unbounded();

        for i in 0..1000 {
            assert_eq!(lru.add(format!("key{}", i), "x".repeat(64)), 0);
        }

        assert_eq!(lru.len(), 1000);
        assert!(lru.used_bytes() > 64 * 1000);
    }

    #[test]
    fn test_lru_remove_skips_callback() {
        let (evicted, callback) = recorder();
        let mut lru = LruCache::new(0, Some(callback));

        lru.add("key1", "value1".to_string());
        lru.add("key2", "value2".to_string());

        assert_eq!(lru.remove("key1"), Some("value1".to_string()));
        assert_eq!(lru.remove("missing"), None);
        assert!(evicted.lock().is_empty());
        assert_eq!(lru.used_bytes(), 10);
        assert_eq!(lru.keys().collect::<Vec<_>>(), vec!["key2"]);
    }

    #[test]
    fn test_lru_slots_are_reused() {
        let mut lru = LruCache::new(4, None);

        for i in 0..100 {
            lru.add(format!("k{}", i % 10), "v".to_string());
        }

        // only one 3-byte entry fits at a time
        assert_eq!(lru.len(), 1);
        assert!(lru.slots.len() <= 2);
    }
}
