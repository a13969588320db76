//! Loader Module
//!
//! The data-source capability a group falls back to on a cache miss.

use std::sync::Arc;

// == Loader ==
/// Fetches source-of-truth bytes for a key (database, disk, remote service).
///
/// Called outside every cache lock. Any timeout policy belongs to the
/// implementation; the cache waits for as long as `load` blocks.
pub trait Loader: Send + Sync {
    /// Loads the bytes for `key`.
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

/// Plain closures work as loaders.
impl<F> Loader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}

/// A shared loader stays usable by the caller after registration.
impl<T> Loader for Arc<T>
where
    T: Loader + ?Sized,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        (**self).load(key)
    }
}
