//! Section table assembly and course-level fragment parsing.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::{cell_text, parse_section_row, CourseRef};
use super::{COURSE_SELECTOR, ROW_SELECTOR, SECTION_TABLE_SELECTOR};
use crate::catalog::error::CatalogError;
use crate::catalog::types::{CourseListing, SectionDetail};

static NAME_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("small").unwrap());
static UNITS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.units").unwrap());
static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static UNITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Component that owns subordinate rows.
const LECTURE: &str = "LEC";
/// Components attached to a lecture instead of listed on their own.
const SUBORDINATE_COMPONENTS: [&str; 2] = ["Rec", "Pro"];

/// Course-level information from a `<section class="course">` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHeader {
    pub prefix: String,
    pub number: String,
    pub name: String,
    pub units: u32,
    pub description: String,
}

impl From<CourseHeader> for CourseListing {
    fn from(header: CourseHeader) -> Self {
        CourseListing {
            prefix: header.prefix,
            number: header.number,
            name: header.name,
        }
    }
}

/// Parses the sections of one course out of a search fragment.
///
/// Only the `<section class="course">` whose id is `PREFIX-NUMBER` is read.
/// A fragment listing other courses only yields no sections. Fails when the
/// fragment has no course section at all or the matching course section has
/// no section table.
pub fn parse_course_fragment(
    fragment: &str,
    course: CourseRef,
) -> Result<Vec<SectionDetail>, CatalogError> {
    let document = Html::parse_fragment(fragment);

    let course_id = format!("{}-{}", course.prefix, course.number);
    let mut candidates = document.select(&COURSE_SELECTOR).peekable();
    if candidates.peek().is_none() {
        return Err(CatalogError::MissingElement {
            element: "section.course",
        });
    }

    let Some(course_html) =
        candidates.find(|el| el.value().attr("id") == Some(course_id.as_str()))
    else {
        warn!(course = %course_id, "Search fragment does not list the requested course");
        return Ok(Vec::new());
    };

    let table = course_html
        .select(&SECTION_TABLE_SELECTOR)
        .next()
        .ok_or(CatalogError::MissingElement {
            element: "table.section-table",
        })?;

    Ok(assemble_sections(table, course))
}

/// Builds the ordered list of top-level sections from a section table.
///
/// "Rec" and "Pro" rows are attached to the first lecture whose section
/// number equals the row's number without its last character ("0012" goes
/// under "001"). Rows with no such lecture are dropped.
pub fn assemble_sections(table: ElementRef, course: CourseRef) -> Vec<SectionDetail> {
    let mut sections: Vec<SectionDetail> = Vec::new();
    // Lecture section number -> index in `sections`
    let mut lectures: HashMap<String, usize> = HashMap::new();

    for row in table.select(&ROW_SELECTOR) {
        let Some(section) = parse_section_row(row, course) else {
            continue;
        };

        if SUBORDINATE_COMPONENTS.contains(&section.component.as_str()) {
            let owner = owner_number(&section.number).and_then(|n| lectures.get(n));
            match owner {
                Some(&idx) => sections[idx]
                    .recitations
                    .get_or_insert_with(Vec::new)
                    .push(section),
                None => warn!(
                    section = %section.number,
                    component = %section.component,
                    "Dropping subordinate section with no matching lecture"
                ),
            }
            continue;
        }

        if section.component == LECTURE {
            lectures
                .entry(section.number.clone())
                .or_insert(sections.len());
        }
        sections.push(section);
    }

    debug!(
        course = %format!("{} {}", course.prefix, course.number),
        sections = sections.len(),
        "Assembled section table"
    );

    sections
}

/// Section number of the lecture owning a subordinate row.
fn owner_number(number: &str) -> Option<&str> {
    let mut chars = number.char_indices();
    chars.next_back().map(|(i, _)| &number[..i])
}

/// Parses the header of every course in a search fragment.
///
/// Courses whose `id` is not of the form `PREFIX-NUMBER` are skipped.
pub fn parse_course_headers(fragment: &str) -> Vec<CourseHeader> {
    let document = Html::parse_fragment(fragment);
    document
        .select(&COURSE_SELECTOR)
        .filter_map(parse_course_header)
        .collect()
}

fn parse_course_header(course_html: ElementRef) -> Option<CourseHeader> {
    let id = course_html.value().attr("id").unwrap_or_default();
    let Some((prefix, number)) = id.split_once('-') else {
        warn!(id = %id, "Skipping course with unexpected id");
        return None;
    };

    let name = course_html
        .select(&NAME_SELECTOR)
        .next()
        .map(cell_text)
        .unwrap_or_default();

    let units_text = course_html
        .select(&UNITS_SELECTOR)
        .next()
        .map(cell_text)
        .unwrap_or_default();
    let units = UNITS_REGEX
        .find(&units_text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or_else(|| {
            warn!(id = %id, text = %units_text, "Could not read course units, defaulting to 0");
            0
        });

    // make each paragraph a new line
    let description = course_html
        .select(&PARAGRAPH_SELECTOR)
        .map(cell_text)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some(CourseHeader {
        prefix: prefix.trim().to_string(),
        number: number.trim().to_string(),
        name,
        units,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSC_316: CourseRef = CourseRef {
        prefix: "CSC",
        number: "316",
    };

    fn row(number: &str, component: &str) -> String {
        format!(
            "<tr><td>{number}</td><td>{component}</td><td>1</td>\
             <td><span>Open</span> 5 / 30</td><td>meets F 10:40 AM - 12:30 PM</td>\
             <td>1231 EB2</td><td><a>Staff</a></td><td>08/19/26 - 12/04/26</td></tr>"
        )
    }

    fn fragment(rows: &[String]) -> String {
        format!(
            r#"<section class="course" id="CSC-316">
                <h1>CSC 316 <small>Data Structures and Algorithms</small></h1>
                <span class="units">Units: 3</span>
                <table class="section-table">
                    <tr><th>Section</th><th>Component</th></tr>
                    {}
                </table>
            </section>"#,
            rows.concat()
        )
    }

    fn numbers(sections: &[SectionDetail]) -> Vec<&str> {
        sections.iter().map(|s| s.number.as_str()).collect()
    }

    #[test]
    fn test_recitation_attaches_to_lecture() {
        let html = fragment(&[row("001", "LEC"), row("0012", "Rec")]);
        let sections = parse_course_fragment(&html, CSC_316).unwrap();

        assert_eq!(numbers(&sections), vec!["001"]);
        let recitations = sections[0].recitations.as_ref().unwrap();
        assert_eq!(numbers(recitations), vec!["0012"]);
        assert!(recitations[0].recitations.is_none());
    }

    #[test]
    fn test_orphan_subordinate_is_dropped() {
        let html = fragment(&[row("001", "LEC"), row("999", "Rec"), row("002", "LEC")]);
        let sections = parse_course_fragment(&html, CSC_316).unwrap();

        assert_eq!(numbers(&sections), vec!["001", "002"]);
        assert!(sections.iter().all(|s| s.recitations.is_none()));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let html = fragment(&[
            row("001", "LEC"),
            row("201", "LAB"),
            row("002", "LEC"),
            row("003", "LEC"),
        ]);
        let sections = parse_course_fragment(&html, CSC_316).unwrap();
        assert_eq!(numbers(&sections), vec!["001", "201", "002", "003"]);
    }

    #[test]
    fn test_recitations_keep_encounter_order_across_lectures() {
        let html = fragment(&[
            row("001", "LEC"),
            row("002", "LEC"),
            row("0021", "Pro"),
            row("0011", "Rec"),
            row("0012", "Rec"),
        ]);
        let sections = parse_course_fragment(&html, CSC_316).unwrap();

        assert_eq!(
            numbers(sections[0].recitations.as_ref().unwrap()),
            vec!["0011", "0012"]
        );
        assert_eq!(numbers(sections[1].recitations.as_ref().unwrap()), vec!["0021"]);
    }

    #[test]
    fn test_subordinate_only_attaches_to_lectures() {
        let html = fragment(&[row("201", "LAB"), row("2011", "Rec")]);
        let sections = parse_course_fragment(&html, CSC_316).unwrap();

        assert_eq!(numbers(&sections), vec!["201"]);
        assert!(sections[0].recitations.is_none());
    }

    #[test]
    fn test_duplicate_lecture_number_first_wins() {
        let html = fragment(&[row("001", "LEC"), row("001", "LEC"), row("0011", "Rec")]);
        let sections = parse_course_fragment(&html, CSC_316).unwrap();

        assert_eq!(sections.len(), 2);
        assert!(sections[0].recitations.is_some());
        assert!(sections[1].recitations.is_none());
    }

    #[test]
    fn test_parsing_is_repeatable() {
        let html = fragment(&[row("001", "LEC"), row("0012", "Rec"), row("201", "LAB")]);
        let first = parse_course_fragment(&html, CSC_316).unwrap();
        let second = parse_course_fragment(&html, CSC_316).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_course_section_is_an_error() {
        let err = parse_course_fragment("<div>nothing</div>", CSC_316).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingElement {
                element: "section.course"
            }
        );
        assert!(!err.is_upstream_failure());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let html = r#"<section class="course" id="CSC-316"><p>No sections</p></section>"#;
        let err = parse_course_fragment(html, CSC_316).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingElement {
                element: "table.section-table"
            }
        );
    }

    #[test]
    fn test_matching_course_is_selected() {
        let other = r#"<section class="course" id="CSC-216">
            <table class="section-table"></table></section>"#;
        let html = format!("{other}{}", fragment(&[row("001", "LEC")]));
        let sections = parse_course_fragment(&html, CSC_316).unwrap();
        assert_eq!(numbers(&sections), vec!["001"]);
    }

    #[test]
    fn test_other_course_is_never_relabelled() {
        let html = r#"<section class="course" id="CSC-216">
            <table class="section-table">
                <tr><td>001</td><td>LEC</td><td>1</td><td><span>Open</span> 5 / 30</td>
                    <td>TBD</td><td>Online</td><td><a>Other Prof</a></td>
                    <td>08/19/26 - 12/04/26</td></tr>
            </table></section>"#;

        let sections = parse_course_fragment(html, CSC_316).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_owner_number() {
        assert_eq!(owner_number("0012"), Some("001"));
        assert_eq!(owner_number("9"), Some(""));
        assert_eq!(owner_number(""), None);
    }

    #[test]
    fn test_parse_course_headers() {
        let html = format!(
            r#"{}
            <section class="course" id="CSC-226">
                <h1>CSC 226 <small>Discrete Mathematics</small></h1>
                <span class="units">Units: 1 - 3</span>
                <p>Logic and sets.</p>
                <p>  Graph theory. </p>
            </section>
            <section class="course"><small>No id</small></section>"#,
            fragment(&[])
        );

        let headers = parse_course_headers(&html);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].prefix, "CSC");
        assert_eq!(headers[0].number, "316");
        assert_eq!(headers[0].name, "Data Structures and Algorithms");
        assert_eq!(headers[0].units, 3);
        assert_eq!(headers[0].description, "");
        assert_eq!(
            headers[1],
            CourseHeader {
                prefix: "CSC".to_string(),
                number: "226".to_string(),
                name: "Discrete Mathematics".to_string(),
                units: 1,
                description: "Logic and sets.\nGraph theory.".to_string(),
            }
        );
    }
}
