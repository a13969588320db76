//! Group Module
//!
//! Cache-aside namespaces and the registry that names them.

mod loader;
mod namespace;
mod registry;

pub use loader::Loader;
pub use namespace::Group;
pub use registry::Registry;
