use std::sync::Arc;

use crate::catalog::CourseCatalog;
use crate::config::CatalogMode;
use crate::professors::ProfessorDirectory;

/// State shared by every request handler.
pub struct AppState {
    /// Course data source (mock fixtures or the live catalog)
    pub catalog: Arc<dyn CourseCatalog>,
    /// Professor rating lookup
    pub professors: ProfessorDirectory,
    /// Mode the catalog was built for, reported by `/health`
    pub mode: CatalogMode,
}
