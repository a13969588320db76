//! API Module
//!
//! HTTP handlers and routing that expose registered groups.
//!
//! # Endpoints
//! - `GET /api/:group/:key` - Fetch a key through a group
//! - `GET /stats/:group` - Get a group's cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
