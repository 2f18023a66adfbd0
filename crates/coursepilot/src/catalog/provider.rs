//! Course data providers.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use super::client::CatalogClient;
use super::error::CatalogError;
use super::parse::{
    parse_course_fragment, parse_course_headers, parse_subject_options, CourseHeader, CourseRef,
};
use super::types::*;

/// Source of course catalog data used by the API.
///
/// `Ok(None)` means "no such thing"; `Err` means the data could not be
/// obtained.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    async fn prefixes(&self) -> Result<Vec<CoursePrefixListing>, CatalogError>;

    async fn courses_by_prefix(&self, prefix: &str) -> Result<Vec<CourseListing>, CatalogError>;

    async fn course_info(
        &self,
        prefix: &str,
        number: &str,
    ) -> Result<Option<CourseDetail>, CatalogError>;

    /// Sections of a course in a semester, or `None` for an unknown semester.
    async fn course_sections(
        &self,
        prefix: &str,
        number: &str,
        semester: &str,
    ) -> Result<Option<Vec<SectionDetail>>, CatalogError>;

    async fn semesters(&self) -> Result<Vec<Semester>, CatalogError>;
}

/// Catalog backed by the upstream course catalog web application.
pub struct LiveCatalog {
    client: CatalogClient,
    semesters: Vec<Semester>,
    /// Semester used for subject listings
    current: Semester,
}

impl LiveCatalog {
    /// Creates a live catalog.
    ///
    /// # Arguments
    /// * `client` - Client for the upstream catalog
    /// * `semesters` - Semesters the API exposes, with their term codes
    /// * `current` - Semester used when listing a subject's courses
    pub fn new(client: CatalogClient, semesters: Vec<Semester>, current: Semester) -> Self {
        Self {
            client,
            semesters,
            current,
        }
    }

    fn semester(&self, code: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.code == code)
    }
}

#[async_trait]
impl CourseCatalog for LiveCatalog {
    async fn prefixes(&self) -> Result<Vec<CoursePrefixListing>, CatalogError> {
        let html = self.client.fetch_index().await?;
        let prefixes = parse_subject_options(&html);
        if prefixes.is_empty() {
            warn!("Catalog index page listed no subjects");
        }
        Ok(prefixes)
    }

    async fn courses_by_prefix(&self, prefix: &str) -> Result<Vec<CourseListing>, CatalogError> {
        let Some(html) = self
            .client
            .search_subject(prefix, &self.current.term_code)
            .await?
        else {
            return Ok(Vec::new());
        };

        Ok(parse_course_headers(&html)
            .into_iter()
            .filter(|header| header.prefix == prefix)
            .map(CourseListing::from)
            .collect())
    }

    async fn course_info(
        &self,
        prefix: &str,
        number: &str,
    ) -> Result<Option<CourseDetail>, CatalogError> {
        let searches = self.semesters.iter().map(|semester| async move {
            let html = self
                .client
                .search_course(prefix, number, &semester.term_code)
                .await?;
            let header = html.and_then(|html| {
                parse_course_headers(&html)
                    .into_iter()
                    .find(|h| h.prefix == prefix && h.number == number)
            });
            Ok::<_, CatalogError>((semester, header))
        });

        let mut found: Option<CourseHeader> = None;
        let mut semesters = Vec::new();
        for result in join_all(searches).await {
            let (semester, header) = result?;
            if let Some(header) = header {
                semesters.push(semester.code.clone());
                found.get_or_insert(header);
            }
        }

        info!(
            course = %format!("{} {}", prefix, number),
            semesters = semesters.len(),
            "Looked up course across semesters"
        );

        Ok(found.map(|header| CourseDetail {
            prefix: header.prefix,
            number: header.number,
            name: header.name,
            description: header.description,
            units: header.units,
            semesters,
        }))
    }

    async fn course_sections(
        &self,
        prefix: &str,
        number: &str,
        semester: &str,
    ) -> Result<Option<Vec<SectionDetail>>, CatalogError> {
        let Some(semester) = self.semester(semester) else {
            return Ok(None);
        };

        let Some(html) = self
            .client
            .search_course(prefix, number, &semester.term_code)
            .await?
        else {
            return Ok(Some(Vec::new()));
        };

        let course = CourseRef { prefix, number };
        parse_course_fragment(&html, course).map(Some)
    }

    async fn semesters(&self) -> Result<Vec<Semester>, CatalogError> {
        Ok(self.semesters.clone())
    }
}
