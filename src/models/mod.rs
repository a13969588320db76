//! Response models for the cache HTTP API
//!
//! DTOs serialized into the bodies of HTTP responses.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, GetResponse, HealthResponse, StatsResponse};
