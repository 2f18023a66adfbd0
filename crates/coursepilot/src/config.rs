/// Application configuration
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::catalog::Semester;

/// Base URL for the course catalog web application.
const CATALOG_BASE_URL: &str = "https://webappprd.acs.ncsu.edu/php/coursecat";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where course data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Static fixtures, for local development
    Mock,
    /// Scrape the upstream catalog
    Live,
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub mode: CatalogMode,
    pub log_level: String,
    pub upstream: UpstreamConfig,
    pub semesters: Vec<Semester>,
    /// Semester used for live subject listings. Defaults to the first semester.
    pub current_semester: Option<String>,
    /// JSON file with a list of professors. Built-in data is used when unset.
    pub professors_path: Option<PathBuf>,
}

/// Settings for talking to the upstream catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: CATALOG_BASE_URL.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl UpstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the HTTP client shared by every upstream request.
    pub fn build_http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.connect_timeout())
            .build()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            mode: CatalogMode::Mock,
            log_level: "info".to_string(),
            upstream: UpstreamConfig::default(),
            semesters: vec![
                Semester {
                    code: "fall2026".to_string(),
                    name: "Fall 2026".to_string(),
                    term_code: "2268".to_string(),
                },
                Semester {
                    code: "spring2026".to_string(),
                    name: "Spring 2026".to_string(),
                    term_code: "2262".to_string(),
                },
            ],
            current_semester: None,
            professors_path: None,
        }
    }
}

impl AppConfig {
    /// Loads and validates a configuration file
    ///
    /// # Arguments
    /// * `path` - Path to a JSON config file. Missing fields take their defaults.
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - Validated configuration
    /// * `Err` - If the file can't be read, parsed or is invalid
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` if given, otherwise returns validated defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.upstream.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "upstream.base_url {:?} is not a URL: {}",
                self.upstream.base_url, e
            ))
        })?;

        if self.upstream.connect_timeout_secs == 0 || self.upstream.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "upstream timeouts must be at least one second".to_string(),
            ));
        }

        if self.semesters.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one semester must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for semester in &self.semesters {
            if !seen.insert(semester.code.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate semester code {:?}",
                    semester.code
                )));
            }
        }

        if let Some(current) = &self.current_semester {
            if !seen.contains(current.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "current_semester {:?} is not a configured semester",
                    current
                )));
            }
        }

        Ok(())
    }

    /// Gets a semester by its public code
    pub fn semester(&self, code: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.code == code)
    }

    /// The semester used when a request does not name one
    pub fn current_semester(&self) -> Option<&Semester> {
        match &self.current_semester {
            Some(code) => self.semester(code),
            None => self.semesters.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "coursepilot-{}-{}.json",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.mode, CatalogMode::Mock);
        assert_eq!(config.current_semester().unwrap().code, "fall2026");
        assert_eq!(config.semester("spring2026").unwrap().term_code, "2262");
        assert_eq!(config.upstream.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = write_temp(
            "partial",
            r#"{"mode": "live", "upstream": {"request_timeout_secs": 5}}"#,
        );
        let config = AppConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.mode, CatalogMode::Live);
        assert_eq!(config.upstream.request_timeout_secs, 5);
        assert_eq!(config.upstream.base_url, CATALOG_BASE_URL);
        assert_eq!(config.semesters.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_current_semester() {
        let config = AppConfig {
            current_semester: Some("summer1999".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_duplicate_semesters_and_bad_url() {
        let mut config = AppConfig::default();
        config.semesters.push(config.semesters[0].clone());
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.upstream.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let config = AppConfig {
            semesters: Vec::new(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut config = AppConfig::default();
        config.upstream.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.upstream.connect_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let path = write_temp("zero-timeout", r#"{"upstream": {"request_timeout_secs": 0}}"#);
        let result = AppConfig::load_from_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_http_client() {
        assert!(UpstreamConfig::default().build_http_client().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load_from_file(Path::new("/nonexistent/coursepilot.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
