//! Professor rating lookup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::ConfigError;

/// Rating summary for one professor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessorDetail {
    pub name: String,
    pub department: String,
    pub school: String,
    pub num_ratings: u32,
    pub overall_quality: f32,
    pub difficulty: f32,
    /// Percentage of students who would take the professor again
    pub would_take_again: f32,
    pub link: String,
}

/// Flat by-name professor lookup.
pub struct ProfessorDirectory {
    professors: Vec<ProfessorDetail>,
}

impl ProfessorDirectory {
    pub fn new(professors: Vec<ProfessorDetail>) -> Self {
        Self { professors }
    }

    /// Loads a JSON array of professors
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let professors = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(professors))
    }

    /// Built-in sample data
    pub fn with_fixtures() -> Self {
        Self::new(fixture_professors())
    }

    /// Gets a professor by exact name
    pub fn get(&self, name: &str) -> Option<&ProfessorDetail> {
        self.professors.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.professors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.professors.is_empty()
    }
}

impl Default for ProfessorDirectory {
    fn default() -> Self {
        Self::with_fixtures()
    }
}

fn fixture_professors() -> Vec<ProfessorDetail> {
    [
        ("Bob Reaves", "Computer Science", 120, 4.5, 3.2, 90.0, "123456"),
        ("E. F. Gehringer", "Computer Science", 85, 4.1, 3.8, 87.0, "234567"),
        ("Jacob Gardner", "Computer Science", 40, 4.0, 2.9, 80.0, "345678"),
        ("Joanna Stegall", "Health Exercise Studies", 25, 4.7, 2.5, 95.0, "456789"),
        ("D. E. Couto", "Computer Science", 60, 4.2, 3.0, 88.0, "567890"),
    ]
    .into_iter()
    .map(
        |(name, department, num_ratings, overall_quality, difficulty, would_take_again, id)| {
            ProfessorDetail {
                name: name.to_string(),
                department: department.to_string(),
                school: "NC State University".to_string(),
                num_ratings,
                overall_quality,
                difficulty,
                would_take_again,
                link: format!("https://www.ratemyprofessors.com/professor/{}", id),
            }
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact_match() {
        let directory = ProfessorDirectory::with_fixtures();
        let prof = directory.get("Bob Reaves").unwrap();
        assert_eq!(prof.num_ratings, 120);
        assert_eq!(prof.link, "https://www.ratemyprofessors.com/professor/123456");

        assert!(directory.get("bob reaves").is_none());
        assert!(directory.get("Staff").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("coursepilot-profs-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"name": "Ada Lovelace", "department": "Mathematics", "school": "NC State University",
                 "num_ratings": 3, "overall_quality": 5.0, "difficulty": 4.0,
                 "would_take_again": 100.0, "link": "https://example.com/ada"}]"#,
        )
        .unwrap();

        let directory = ProfessorDirectory::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("Ada Lovelace").unwrap().department, "Mathematics");
    }
}
