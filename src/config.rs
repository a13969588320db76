//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget of the served group (0 = unbounded)
    pub max_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Name the sample group is registered under
    pub group_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_BYTES` - Byte budget per group (default: 2048)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `GROUP_NAME` - Group name (default: "scores")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_bytes: env::var("CACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_bytes),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.group_name),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: 2 << 10,
            server_port: 3000,
            group_name: "scores".to_string(),
        }
    }
}
