//! Liveness probe.

use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health — liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive")),
    tag = "health"
)]
pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
