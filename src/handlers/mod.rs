//! HTTP Handlers

pub mod posts;

use axum::{response::IntoResponse, Json};

/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
