/// Course catalog scraping module
mod client;
mod error;
mod mock;
mod parse;
mod provider;
mod types;

pub use client::{search_form, unwrap_fragment, CatalogClient};
pub use error::CatalogError;
pub use mock::MockCatalog;
pub use parse::*;
pub use provider::{CourseCatalog, LiveCatalog};
pub use types::*;

use std::sync::Arc;

use crate::config::{AppConfig, CatalogMode, ConfigError};

/// Builds the catalog selected by the configuration
///
/// # Arguments
/// * `config` - Application configuration
/// * `client` - Shared HTTP client, used in live mode
///
/// # Returns
/// * `Ok(Arc<dyn CourseCatalog>)` - The catalog
/// * `Err` - If live mode has no current semester
pub fn build_catalog(
    config: &AppConfig,
    client: reqwest::Client,
) -> Result<Arc<dyn CourseCatalog>, ConfigError> {
    match config.mode {
        CatalogMode::Mock => Ok(Arc::new(MockCatalog::new(config.semesters.clone()))),
        CatalogMode::Live => {
            let current = config
                .current_semester()
                .cloned()
                .ok_or_else(|| ConfigError::Invalid("no current semester".to_string()))?;
            let client = CatalogClient::with_client(client, &config.upstream);
            Ok(Arc::new(LiveCatalog::new(
                client,
                config.semesters.clone(),
                current,
            )))
        }
    }
}
