//! Informational route handlers.

use axum::{extract::State, Json};

use crate::types::{HealthResponse, HealthStatus, ListMoodsResponse};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let artifacts = state.pipeline.artifacts().status();

    // Degraded if any artifact slot is empty
    let status = if artifacts.all_loaded() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        version: VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        artifacts,
    })
}

/// GET /api/v1/moods
///
/// List mood labels in classifier output order.
pub async fn list_moods() -> Json<ListMoodsResponse> {
    Json(ListMoodsResponse::from_labels())
}
