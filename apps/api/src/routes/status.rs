//! Status route
//!
//! - `GET /status` - Liveness check used by the chat UI

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Service name reported by the status endpoint
pub const SERVICE_NAME: &str = "Claude + Spotify MCP Server";

/// Create the status router
pub fn status_router() -> Router {
    Router::new().route("/status", get(status))
}

async fn status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}
