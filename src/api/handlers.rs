//! API Handlers
//!
//! HTTP request handlers exposing registered groups.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{CacheError, Result};
use crate::group::{Group, Registry};
use crate::models::{GetResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the group registry behind an Arc; each group does its own locking.
#[derive(Clone)]
pub struct AppState {
    /// Registered groups
    pub registry: Arc<Registry>,
}

impl AppState {
    /// Creates a new AppState around the given registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    fn group(&self, name: &str) -> Result<Arc<Group>> {
        self.registry
            .lookup(name)
            .ok_or_else(|| CacheError::GroupNotFound(name.to_string()))
    }
}

/// Handler for GET /api/:group/:key
///
/// Serves the key from the group's cache, loading it on a miss. The lookup
/// runs on the blocking pool since loaders may block.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((group_name, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let group = state.group(&group_name)?;

    let lookup_key = key.clone();
    let value = tokio::task::spawn_blocking(move || group.get(&lookup_key))
        .await
        .map_err(|e| CacheError::Internal(e.to_string()))??;

    Ok(Json(GetResponse::new(group_name, key, value.text())))
}

/// Handler for GET /stats/:group
///
/// Returns the group's cache statistics.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
) -> Result<Json<StatsResponse>> {
    let group = state.group(&group_name)?;
    Ok(Json(StatsResponse::new(group.name(), &group.stats())))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
