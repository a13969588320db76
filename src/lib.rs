//! Mini Groupcache - A byte-bounded in-process cache
//!
//! Provides an LRU engine with byte accounting and cache-aside groups that
//! load missing keys from a caller-supplied source.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;

pub use api::AppState;
pub use cache::{ByteView, Sizeable};
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{Group, Loader, Registry};
