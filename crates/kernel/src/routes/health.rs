//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    settings_backend: &'static str,
    settings_revision: u64,
    content_types: usize,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (settings_backend, settings_revision) = {
        let store = state.store().lock().await;
        (store.backend_name(), store.revision())
    };

    Json(HealthResponse {
        status: "healthy",
        settings_backend,
        settings_revision,
        content_types: state.registry().len(),
    })
}

/// Create the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
