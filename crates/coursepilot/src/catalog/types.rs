/// Types for course catalog data
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A subject prefix offered by the catalog (e.g., "CSC")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePrefixListing {
    pub prefix: String,
    pub name: String,
}

/// A course as it appears in a per-prefix listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseListing {
    pub prefix: String,
    pub number: String,
    pub name: String,
}

/// Full course information. Identified by `(prefix, number)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    pub prefix: String,
    pub number: String,
    pub name: String,
    pub description: String,
    pub units: u32,
    /// Public semester codes in which the course is offered
    pub semesters: Vec<String>,
}

/// Seat counts for a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Upstream wording, e.g. "Open", "Closed", "Waitlist"
    pub status: String,
    #[serde(rename = "openSeats")]
    pub open_seats: u32,
    #[serde(rename = "maxSeats")]
    pub max_seats: u32,
    pub waitlisted: u32,
}

/// Day token used when a section has no scheduled meeting time.
pub const TBD_DAY: &str = "TBD";

/// Meeting pattern of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: Vec<String>,
    #[serde(rename = "from_time", with = "clock_time", default)]
    pub start: Option<NaiveTime>,
    #[serde(rename = "to_time", with = "clock_time", default)]
    pub end: Option<NaiveTime>,
}

impl Schedule {
    /// The unscheduled sentinel: days = ["TBD"], no times.
    pub fn tbd() -> Self {
        Self {
            days: vec![TBD_DAY.to_string()],
            start: None,
            end: None,
        }
    }

    pub fn is_tbd(&self) -> bool {
        self.days.len() == 1 && self.days[0] == TBD_DAY
    }
}

/// One section (lecture, lab, recitation, ...) of a course in a given term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDetail {
    pub course_prefix: String,
    pub course_number: String,
    /// Catalog-assigned, only unique within a course and term
    pub number: String,
    /// Upstream component label ("LEC", "LAB", "Rec", "Pro", "Phy", ...)
    pub component: String,
    pub availability: Availability,
    /// Subordinate rows owned by this lecture. Never nested further.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recitations: Option<Vec<SectionDetail>>,
    pub schedule: Schedule,
    pub location: String,
    pub instructors: Vec<String>,
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Enrollment reservations, one per `reserve` popover
    pub restrictions: Vec<String>,
    /// Text of the section's `notes` popover
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    /// Text of the section's `reqs` popover
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub requisites: Option<String>,
}

/// A semester as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Public code, e.g. "fall2026"
    pub code: String,
    pub name: String,
    /// Term code used by the upstream catalog. Not intended for public viewing.
    #[serde(skip_serializing)]
    pub term_code: String,
}

/// `HH:MM` (de)serialization for optional clock times.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_serializes_clock_times() {
        let schedule = Schedule {
            days: vec!["M".to_string(), "W".to_string()],
            start: NaiveTime::from_hms_opt(13, 30, 0),
            end: NaiveTime::from_hms_opt(14, 45, 0),
        };

        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["from_time"], "13:30");
        assert_eq!(value["to_time"], "14:45");

        let back: Schedule = serde_json::from_value(value).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_tbd_schedule_has_null_times() {
        let value = serde_json::to_value(Schedule::tbd()).unwrap();
        assert_eq!(value["days"], serde_json::json!(["TBD"]));
        assert!(value["from_time"].is_null());
        assert!(Schedule::tbd().is_tbd());
    }

    #[test]
    fn test_semester_hides_term_code() {
        let semester = Semester {
            code: "fall2026".to_string(),
            name: "Fall 2026".to_string(),
            term_code: "2268".to_string(),
        };

        let value = serde_json::to_value(&semester).unwrap();
        assert!(value.get("term_code").is_none());
        assert_eq!(value["code"], "fall2026");
    }
}
