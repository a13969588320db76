//! Cache Module
//!
//! Provides a byte-bounded LRU engine, the immutable byte view it stores,
//! and a thread-safe wrapper around the two.

mod byteview;
mod lru;
mod sizeable;
mod stats;
mod store;


// Re-export public types
pub use byteview::ByteView;
pub use lru::{EvictionCallback, LruCache};
pub use sizeable::Sizeable;
pub use stats::CacheStats;
pub use store::CacheStore;
