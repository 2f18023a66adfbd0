//! Error types for the course catalog subsystem.

use thiserror::Error;

/// Errors that can occur while fetching or decoding catalog data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Network/HTTP request failed (including timeouts)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Upstream responded with a non-success status
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    /// Response body was not the expected JSON envelope
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    /// Upstream rendered an error page inside a successful response
    #[error("Upstream reported an error: {message}")]
    UpstreamError { message: String },

    /// The fragment lacks an element the parser cannot do without
    #[error("Missing element in catalog fragment: {element}")]
    MissingElement { element: &'static str },
}

impl CatalogError {
    /// Returns true if the catalog could not be reached or answered unusably.
    ///
    /// Callers should treat these as a service failure, not as "no data".
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Network { .. }
                | CatalogError::UpstreamStatus { .. }
                | CatalogError::MalformedPayload { .. }
                | CatalogError::UpstreamError { .. }
        )
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::MalformedPayload {
            message: err.to_string(),
        }
    }
}
