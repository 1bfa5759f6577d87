//! Welcome and heartbeat endpoints.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::state::AppState;

pub const WELCOME: &str = "Welcome to the Car API";

#[derive(OpenApi)]
#[openapi(paths(get_welcome, get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_welcome))
        .route("/health", get(get_health))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Plain-text greeting", body = String))
)]
pub async fn get_welcome() -> &'static str {
    WELCOME
}

/// Heartbeat endpoint.
///
/// Returns `{"status": "ok", "version": "..."}` with HTTP 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is healthy", body = Value))
)]
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status":  "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
