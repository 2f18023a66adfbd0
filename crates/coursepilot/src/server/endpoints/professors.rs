use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /professors/:name
/// Returns the rating summary of a professor (exact name match)
pub async fn get_professor(
    Path(name): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /professors/{}", name);

    match s.professors.get(&name) {
        Some(professor) => (StatusCode::OK, Json(professor)).into_response(),
        None => ApiErrorType::from((StatusCode::NOT_FOUND, "Professor not found", None))
            .into_response(),
    }
}
