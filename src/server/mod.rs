//! HTTP server setup and routing.

mod predict;
mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::inference::ModelArtifacts;
use crate::pipeline::Pipeline;

/// Shared application state passed to all handlers.
///
/// Artifacts are loaded before the state is built and never change
/// afterwards, so handlers need no locking.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: &AppConfig, artifacts: ModelArtifacts) -> Self {
        let pipeline = Pipeline::new(Arc::new(artifacts)).with_top_n(config.recommend.top_n);
        Self {
            pipeline,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/moods", get(routes::list_moods));

    Router::new()
        .route("/api/ml/predict", post(predict::predict))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
