//! Course catalog endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::catalog::CatalogError;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Converts a CatalogError to an API response.
///
/// Every upstream failure maps to the same response, distinct from 404.
fn catalog_error_to_response(error: CatalogError) -> Response {
    let message = if error.is_upstream_failure() {
        "Course catalog is unavailable"
    } else {
        "Course catalog returned an unexpected page"
    };

    ApiErrorType::from((StatusCode::BAD_GATEWAY, message, Some(error.to_string()))).into_response()
}

fn not_found(message: &str) -> Response {
    ApiErrorType::from((StatusCode::NOT_FOUND, message, None)).into_response()
}

/// GET /courses
/// Returns all subject prefixes
pub async fn get_course_prefixes(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /courses");

    match s.catalog.prefixes().await {
        Ok(prefixes) => (StatusCode::OK, Json(prefixes)).into_response(),
        Err(e) => {
            error!("Failed to fetch course prefixes: {}", e);
            catalog_error_to_response(e)
        }
    }
}

/// GET /courses/:prefix
/// Returns the courses of a subject prefix
pub async fn get_courses_by_prefix(
    Path(prefix): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /courses/{}", prefix);

    match s.catalog.courses_by_prefix(&prefix).await {
        Ok(courses) if courses.is_empty() => not_found("Prefix not found"),
        Ok(courses) => (StatusCode::OK, Json(courses)).into_response(),
        Err(e) => {
            error!("Failed to fetch courses for {}: {}", prefix, e);
            catalog_error_to_response(e)
        }
    }
}

/// GET /courses/:prefix/:number
/// Returns the details of one course
pub async fn get_course_info(
    Path((prefix, number)): Path<(String, String)>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /courses/{}/{}", prefix, number);

    match s.catalog.course_info(&prefix, &number).await {
        Ok(Some(course)) => (StatusCode::OK, Json(course)).into_response(),
        Ok(None) => not_found("Course not found"),
        Err(e) => {
            error!("Failed to fetch course {} {}: {}", prefix, number, e);
            catalog_error_to_response(e)
        }
    }
}

/// GET /courses/:prefix/:number/:semester
/// Returns the sections of a course in a semester
pub async fn get_course_sections(
    Path((prefix, number, semester)): Path<(String, String, String)>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /courses/{}/{}/{}", prefix, number, semester);

    match s.catalog.course_sections(&prefix, &number, &semester).await {
        Ok(Some(sections)) => (StatusCode::OK, Json(sections)).into_response(),
        Ok(None) => not_found("Course sections not found for this semester"),
        Err(e) => {
            error!(
                "Failed to fetch sections of {} {} for {}: {}",
                prefix, number, semester, e
            );
            catalog_error_to_response(e)
        }
    }
}

/// GET /semesters
/// Returns the semesters the API knows about
pub async fn get_semesters(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /semesters");

    match s.catalog.semesters().await {
        Ok(semesters) => (StatusCode::OK, Json(semesters)).into_response(),
        Err(e) => {
            error!("Failed to fetch semesters: {}", e);
            catalog_error_to_response(e)
        }
    }
}
