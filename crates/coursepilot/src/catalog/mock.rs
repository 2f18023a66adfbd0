//! Fixture-backed catalog for local development.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

use super::error::CatalogError;
use super::provider::CourseCatalog;
use super::types::*;

/// A catalog that serves a fixed set of courses and sections.
pub struct MockCatalog {
    prefixes: Vec<CoursePrefixListing>,
    courses: Vec<CourseDetail>,
    /// Semester code -> sections offered that semester
    sections: HashMap<String, Vec<SectionDetail>>,
    semesters: Vec<Semester>,
}

impl MockCatalog {
    /// Creates a mock catalog serving the given semesters.
    ///
    /// Sections exist only for the built-in fall2026 and spring2026 fixtures.
    pub fn new(semesters: Vec<Semester>) -> Self {
        Self {
            prefixes: fixture_prefixes(),
            courses: fixture_courses(),
            sections: fixture_sections(),
            semesters,
        }
    }
}

#[async_trait]
impl CourseCatalog for MockCatalog {
    async fn prefixes(&self) -> Result<Vec<CoursePrefixListing>, CatalogError> {
        Ok(self.prefixes.clone())
    }

    async fn courses_by_prefix(&self, prefix: &str) -> Result<Vec<CourseListing>, CatalogError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| c.prefix == prefix)
            .map(|c| CourseListing {
                prefix: c.prefix.clone(),
                number: c.number.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn course_info(
        &self,
        prefix: &str,
        number: &str,
    ) -> Result<Option<CourseDetail>, CatalogError> {
        Ok(self
            .courses
            .iter()
            .find(|c| c.prefix == prefix && c.number == number)
            .cloned())
    }

    async fn course_sections(
        &self,
        prefix: &str,
        number: &str,
        semester: &str,
    ) -> Result<Option<Vec<SectionDetail>>, CatalogError> {
        Ok(self.sections.get(semester).map(|sections| {
            sections
                .iter()
                .filter(|s| s.course_prefix == prefix && s.course_number == number)
                .cloned()
                .collect()
        }))
    }

    async fn semesters(&self) -> Result<Vec<Semester>, CatalogError> {
        Ok(self.semesters.clone())
    }
}

fn fixture_prefixes() -> Vec<CoursePrefixListing> {
    [
        ("CSC", "Computer Science"),
        ("HESF", "Health Exercise Studies Fitness"),
        ("MA", "Mathematics"),
    ]
    .into_iter()
    .map(|(prefix, name)| CoursePrefixListing {
        prefix: prefix.to_string(),
        name: name.to_string(),
    })
    .collect()
}

fn course(
    prefix: &str,
    number: &str,
    name: &str,
    description: &str,
    units: u32,
    semesters: &[&str],
) -> CourseDetail {
    CourseDetail {
        prefix: prefix.to_string(),
        number: number.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        units,
        semesters: semesters.iter().map(|s| s.to_string()).collect(),
    }
}

fn fixture_courses() -> Vec<CourseDetail> {
    vec![
        course(
            "CSC",
            "316",
            "Data Structures and Algorithms",
            "Covers lists, stacks, queues, trees and graphs, together with algorithms \
             for sorting, searching and traversing them.\n\nStudents study algorithm \
             complexity and implement the structures in programming projects.",
            4,
            &["fall2026"],
        ),
        course(
            "CSC",
            "226",
            "Discrete Mathematics",
            "An introduction to discrete mathematics, including logic, set theory, \
             combinatorics, graph theory, and algorithms.",
            4,
            &["spring2026", "fall2026"],
        ),
        course(
            "HESF",
            "100",
            "Cross Training",
            "A fitness course focusing on cross-training techniques to improve overall \
             physical fitness and endurance.",
            1,
            &["fall2026"],
        ),
        course(
            "HESF",
            "101",
            "Fitness and Wellness",
            "A course that provides students with the knowledge and skills to lead a \
             healthy lifestyle.",
            1,
            &["spring2026", "fall2026"],
        ),
        course(
            "MA",
            "241",
            "Calculus II",
            "Second course in a three-course calculus sequence. Covers techniques and \
             applications of integration, infinite series, and polar and parametric equations.",
            4,
            &["spring2026", "fall2026"],
        ),
        course(
            "MA",
            "242",
            "Calculus III",
            "Third course in a three-course calculus sequence. Covers vectors, \
             vector-valued functions, partial derivatives, multiple integrals, and vector calculus.",
            4,
            &["fall2026"],
        ),
    ]
}

/// Fixture row: course, section, seats, meeting, place, people and dates.
struct Fixture {
    course: (&'static str, &'static str),
    number: &'static str,
    component: &'static str,
    /// (status, open, max, waitlisted)
    seats: (&'static str, u32, u32, u32),
    days: &'static [&'static str],
    /// ((h, m), (h, m))
    times: ((u32, u32), (u32, u32)),
    location: &'static str,
    instructors: &'static [&'static str],
    /// ((y, m, d), (y, m, d))
    dates: ((i32, u32, u32), (i32, u32, u32)),
    restrictions: &'static [&'static str],
}

impl From<Fixture> for SectionDetail {
    fn from(f: Fixture) -> Self {
        let time = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0);
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d);
        let (status, open_seats, max_seats, waitlisted) = f.seats;

        SectionDetail {
            course_prefix: f.course.0.to_string(),
            course_number: f.course.1.to_string(),
            number: f.number.to_string(),
            component: f.component.to_string(),
            availability: Availability {
                status: status.to_string(),
                open_seats,
                max_seats,
                waitlisted,
            },
            recitations: None,
            schedule: Schedule {
                days: f.days.iter().map(|d| d.to_string()).collect(),
                start: time(f.times.0),
                end: time(f.times.1),
            },
            location: f.location.to_string(),
            instructors: f.instructors.iter().map(|i| i.to_string()).collect(),
            begin: date(f.dates.0),
            end: date(f.dates.1),
            restrictions: f.restrictions.iter().map(|r| r.to_string()).collect(),
            notes: None,
            requisites: None,
        }
    }
}

const FALL_2026: ((i32, u32, u32), (i32, u32, u32)) = ((2026, 8, 19), (2026, 12, 4));
const FALL_2026_HESF: ((i32, u32, u32), (i32, u32, u32)) = ((2026, 8, 18), (2026, 12, 2));

fn fixture_sections() -> HashMap<String, Vec<SectionDetail>> {
    let fall = vec![
        Fixture {
            course: ("CSC", "316"),
            number: "001",
            component: "LEC",
            seats: ("open", 10, 150, 0),
            days: &["M", "W"],
            times: ((13, 30), (14, 45)),
            location: "2200 EB2",
            instructors: &["Bob Reaves"],
            dates: FALL_2026,
            restrictions: &[],
        },
        Fixture {
            course: ("CSC", "316"),
            number: "002",
            component: "LEC",
            seats: ("waitlist", 0, 150, 5),
            days: &["T", "TH"],
            times: ((10, 15), (11, 30)),
            location: "1231 EB2",
            instructors: &["E. F. Gehringer"],
            dates: FALL_2026,
            restrictions: &[],
        },
        Fixture {
            course: ("CSC", "316"),
            number: "201",
            component: "LAB",
            seats: ("open", 5, 30, 0),
            days: &["F"],
            times: ((10, 40), (12, 30)),
            location: "1231 EB2",
            instructors: &["Staff"],
            dates: FALL_2026,
            restrictions: &[],
        },
        Fixture {
            course: ("CSC", "226"),
            number: "001",
            component: "LEC",
            seats: ("open", 25, 200, 0),
            days: &["T", "TH"],
            times: ((13, 30), (14, 45)),
            location: "102 Dabney",
            instructors: &["Jacob Gardner"],
            dates: FALL_2026,
            restrictions: &[],
        },
        Fixture {
            course: ("HESF", "100"),
            number: "002",
            component: "Phy",
            seats: ("open", 1, 26, 0),
            days: &["M", "W", "F"],
            times: ((8, 30), (9, 20)),
            location: "2615 Carmichael Gym",
            instructors: &["Joanna Stegall"],
            dates: FALL_2026_HESF,
            restrictions: &["Instructor Approval Required"],
        },
        Fixture {
            course: ("HESF", "101"),
            number: "001",
            component: "Phy",
            seats: ("closed", 0, 30, 10),
            days: &["T", "TH"],
            times: ((11, 20), (12, 10)),
            location: "1306 Carmichael Gym",
            instructors: &["Staff"],
            dates: FALL_2026_HESF,
            restrictions: &[],
        },
        Fixture {
            course: ("MA", "241"),
            number: "001",
            component: "LEC",
            seats: ("open", 15, 40, 0),
            days: &["M", "W", "F"],
            times: ((9, 35), (10, 25)),
            location: "2102 SAS Hall",
            instructors: &["Staff"],
            dates: FALL_2026,
            restrictions: &[],
        },
        Fixture {
            course: ("MA", "242"),
            number: "003",
            component: "LEC",
            seats: ("open", 3, 40, 0),
            days: &["T", "TH"],
            times: ((16, 30), (17, 45)),
            location: "3214 SAS Hall",
            instructors: &["Staff"],
            dates: FALL_2026,
            restrictions: &[],
        },
    ];

    let spring = vec![
        Fixture {
            course: ("CSC", "226"),
            number: "001",
            component: "LEC",
            seats: ("open", 30, 200, 0),
            days: &["M", "W", "F"],
            times: ((15, 0), (16, 15)),
            location: "216 Mann Hall",
            instructors: &["D. E. Couto"],
            dates: ((2026, 1, 7), (2026, 4, 22)),
            restrictions: &[],
        },
        Fixture {
            course: ("HESF", "101"),
            number: "003",
            component: "Phy",
            seats: ("open", 5, 30, 0),
            days: &["M", "W"],
            times: ((9, 35), (10, 25)),
            location: "1306 Carmichael Gym",
            instructors: &["Staff"],
            dates: ((2026, 1, 6), (2026, 4, 21)),
            restrictions: &[],
        },
        Fixture {
            course: ("MA", "241"),
            number: "002",
            component: "LEC",
            seats: ("waitlist", 0, 40, 8),
            days: &["T", "TH"],
            times: ((8, 30), (9, 45)),
            location: "1108 SAS Hall",
            instructors: &["Staff"],
            dates: ((2026, 1, 7), (2026, 4, 22)),
            restrictions: &[],
        },
    ];

    HashMap::from([
        (
            "fall2026".to_string(),
            fall.into_iter().map(SectionDetail::from).collect(),
        ),
        (
            "spring2026".to_string(),
            spring.into_iter().map(SectionDetail::from).collect(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn catalog() -> MockCatalog {
        MockCatalog::new(AppConfig::default().semesters)
    }

    #[tokio::test]
    async fn test_courses_by_prefix() {
        let courses = catalog().courses_by_prefix("CSC").await.unwrap();
        let numbers: Vec<&str> = courses.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["316", "226"]);

        assert!(catalog().courses_by_prefix("XYZ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_course_info() {
        let course = catalog().course_info("MA", "241").await.unwrap().unwrap();
        assert_eq!(course.name, "Calculus II");
        assert_eq!(course.semesters, vec!["spring2026", "fall2026"]);

        assert!(catalog().course_info("MA", "999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_course_sections() {
        let sections = catalog()
            .course_sections("CSC", "316", "fall2026")
            .await
            .unwrap()
            .unwrap();
        let numbers: Vec<&str> = sections.iter().map(|s| s.number.as_str()).collect();
        assert_eq!(numbers, vec!["001", "002", "201"]);
        assert_eq!(sections[1].availability.waitlisted, 5);
        assert_eq!(sections[0].schedule.start, NaiveTime::from_hms_opt(13, 30, 0));

        // Known semester but not offered: empty, not missing.
        let none_offered = catalog()
            .course_sections("CSC", "316", "spring2026")
            .await
            .unwrap();
        assert_eq!(none_offered, Some(Vec::new()));

        let unknown = catalog()
            .course_sections("CSC", "316", "summer2026")
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_prefixes_and_semesters() {
        assert_eq!(catalog().prefixes().await.unwrap().len(), 3);
        let semesters = catalog().semesters().await.unwrap();
        assert_eq!(semesters[0].code, "fall2026");
    }
}
