//! HTTP client for the upstream course catalog.
//!
//! The catalog has no public API. Its browse page posts a form to
//! `search.php` over AJAX and receives `{"html": "..."}`, where the HTML
//! fragment holds one `<section class="course">` per matching course.

use reqwest::header::{ACCEPT, REFERER};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use super::error::CatalogError;
use crate::config::UpstreamConfig;

/// Paths for catalog endpoints, relative to the base URL.
const SEARCH_PATH: &str = "/search.php";
const INDEX_PATH: &str = "/index.php";

/// Marker the catalog returns when no course matched the search.
const NO_DATA_MARKER: &str = "Error: No Data Returned";
/// Class used by the catalog's inline error messages.
const WARNING_MARKER: &str = "text-warning";
const COURSE_MARKER: &str = "class=\"course\"";

/// JSON envelope returned by `search.php`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    html: String,
}

/// Builds the form body of a catalog search.
///
/// Filters the catalog's browse page offers but we don't use are sent empty.
/// A subject-wide search leaves `course-number` empty.
pub fn search_form(
    subject: &str,
    course_number: Option<&str>,
    term_code: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("term", term_code.to_string()),
        ("subject", subject.to_string()),
        ("course-inequality", "=".to_string()),
        ("course-number", course_number.unwrap_or_default().to_string()),
        ("course-career", String::new()),
        ("session", String::new()),
        ("start-time-inequality", "<=".to_string()),
        ("start-time", String::new()),
        ("end-time-inequality", "<=".to_string()),
        ("end-time", String::new()),
        ("instructor-name", String::new()),
        ("current_strm", term_code.to_string()),
    ]
}

/// Extracts the HTML fragment from a successful search response body.
///
/// # Returns
/// * `Ok(Some(html))` - The fragment
/// * `Ok(None)` - The catalog reported that nothing matched
/// * `Err` - The body is not the expected JSON or holds an error message
pub fn unwrap_fragment(body: &str) -> Result<Option<String>, CatalogError> {
    if body.contains(NO_DATA_MARKER) {
        return Ok(None);
    }

    let response: SearchResponse = serde_json::from_str(body)?;

    // Availability badges may also carry the warning class, so only a
    // fragment without any course is an error page.
    if response.html.contains(WARNING_MARKER) && !response.html.contains(COURSE_MARKER) {
        return Err(CatalogError::UpstreamError {
            message: response.html.chars().take(200).collect(),
        });
    }

    Ok(Some(response.html))
}

/// Client for searching the course catalog.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl CatalogClient {
    /// Creates a client with its own connection pool.
    pub fn new(config: &UpstreamConfig) -> Result<Self, CatalogError> {
        let client = config
            .build_http_client()
            .map_err(|e| CatalogError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a client on top of an existing (shared) `reqwest::Client`.
    pub fn with_client(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Searches one course in one term.
    ///
    /// # Arguments
    /// * `subject` - Subject prefix, e.g. "CSC"
    /// * `course_number` - Course number, e.g. "316"
    /// * `term_code` - Upstream term code, e.g. "2268"
    ///
    /// # Returns
    /// * `Ok(Some(html))` - The search fragment
    /// * `Ok(None)` - No course matched
    /// * `Err(CatalogError)` - The catalog was unreachable or answered unusably
    pub async fn search_course(
        &self,
        subject: &str,
        course_number: &str,
        term_code: &str,
    ) -> Result<Option<String>, CatalogError> {
        self.search(subject, Some(course_number), term_code).await
    }

    /// Searches every course of a subject in one term.
    pub async fn search_subject(
        &self,
        subject: &str,
        term_code: &str,
    ) -> Result<Option<String>, CatalogError> {
        self.search(subject, None, term_code).await
    }

    /// Fetches the catalog's browse page (contains the subject list).
    pub async fn fetch_index(&self) -> Result<String, CatalogError> {
        let url = self.index_url();
        info!(url = %url, "Fetching catalog index page");

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Catalog index request failed");
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn search(
        &self,
        subject: &str,
        course_number: Option<&str>,
        term_code: &str,
    ) -> Result<Option<String>, CatalogError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let form = search_form(subject, course_number, term_code);
        let course_number = course_number.unwrap_or("*");

        info!(
            subject = %subject,
            course_number = %course_number,
            term = %term_code,
            "Searching course catalog"
        );

        let start = Instant::now();
        let result = self.send_search(&url, &form).await;

        match &result {
            Ok(Some(_)) => info!(
                subject = %subject,
                course_number = %course_number,
                duration_ms = start.elapsed().as_millis() as u64,
                "Catalog search succeeded"
            ),
            Ok(None) => info!(
                subject = %subject,
                course_number = %course_number,
                "Catalog search returned no data"
            ),
            Err(e) => error!(
                subject = %subject,
                course_number = %course_number,
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "Catalog search failed"
            ),
        }

        result
    }

    async fn send_search(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<Option<String>, CatalogError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .header(ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .header(REFERER, self.index_url())
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        unwrap_fragment(&body)
    }

    fn index_url(&self) -> String {
        format!("{}{}", self.base_url, INDEX_PATH)
    }
}
