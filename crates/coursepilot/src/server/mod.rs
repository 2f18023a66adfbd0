use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::server::endpoints::{catalog, professors, status};
use crate::types::AppState;

mod endpoints;
mod types;

pub use types::ApiErrorType;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let catalog_router = Router::new()
        .route("/courses", get(catalog::get_course_prefixes))
        .route("/courses/:prefix", get(catalog::get_courses_by_prefix))
        .route("/courses/:prefix/:number", get(catalog::get_course_info))
        .route(
            "/courses/:prefix/:number/:semester",
            get(catalog::get_course_sections),
        )
        .route("/semesters", get(catalog::get_semesters));

    Router::new()
        .route("/", get(status::get_root))
        .route("/health", get(status::get_health))
        .route("/professors/:name", get(professors::get_professor))
        .merge(catalog_router)
        .with_state(app_state)
}
