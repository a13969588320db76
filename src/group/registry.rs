//! Registry Module
//!
//! Name-to-group mapping shared through application state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::cache::{ByteView, EvictionCallback};
use crate::group::{Group, Loader};

// == Registry ==
/// Owns every registered [`Group`] by name.
///
/// Registration takes the write lock; lookups share the read lock. The lock
/// is independent of every group's cache lock.
#[derive(Debug, Default)]
pub struct Registry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl Registry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Creates a group and stores it under `name`.
    ///
    /// A group already registered under `name` is replaced; handles to the
    /// old group stay valid but it is no longer reachable through `lookup`.
    pub fn register<L>(&self, name: impl Into<String>, max_bytes: usize, loader: L) -> Arc<Group>
    where
        L: Loader + 'static,
    {
        self.insert(Group::new(name, max_bytes, Arc::new(loader), None))
    }

    /// Like [`register`](Self::register), forwarding evicted entries to `on_evict`.
    pub fn register_with_eviction<L>(
        &self,
        name: impl Into<String>,
        max_bytes: usize,
        loader: L,
        on_evict: EvictionCallback<ByteView>,
    ) -> Arc<Group>
    where
        L: Loader + 'static,
    {
        self.insert(Group::new(name, max_bytes, Arc::new(loader), Some(on_evict)))
    }

    fn insert(&self, group: Group) -> Arc<Group> {
        let group = Arc::new(group);
        let name = group.name().to_string();

        let previous = self.groups.write().insert(name.clone(), Arc::clone(&group));
        if previous.is_some() {
            warn!(group = %name, "replaced existing group registration");
        } else {
            info!(group = %name, "registered group");
        }
        group
    }

    // == Lookup ==
    /// Returns the group registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}
