use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::types::AppState;

/// GET /
pub async fn get_root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Course API" }))
}

/// GET /health
pub async fn get_health(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "mode": s.mode })),
    )
}
