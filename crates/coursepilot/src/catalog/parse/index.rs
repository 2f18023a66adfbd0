//! Subject listing from the catalog's browse (index) page.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::cell_text;
use crate::catalog::types::CoursePrefixListing;

static SUBJECT_OPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("select#subject option").unwrap());

/// Reads the subject dropdown: `<option value="CSC">CSC - Computer Science</option>`.
///
/// Placeholder options without a value are skipped. When the label has no
/// `PREFIX - ` lead, the whole label is used as the name.
pub fn parse_subject_options(html: &str) -> Vec<CoursePrefixListing> {
    let document = Html::parse_document(html);

    document
        .select(&SUBJECT_OPTION_SELECTOR)
        .filter_map(|option| {
            let prefix = option.value().attr("value")?.trim();
            if prefix.is_empty() {
                return None;
            }

            let label = cell_text(option);
            let name = label
                .split_once(" - ")
                .filter(|(lead, _)| lead.trim() == prefix)
                .map(|(_, name)| name.trim().to_string())
                .unwrap_or(label);

            Some(CoursePrefixListing {
                prefix: prefix.to_string(),
                name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subject_options() {
        let html = r#"<html><body><form>
            <select id="term"><option value="2268">Fall 2026</option></select>
            <select id="subject">
                <option value="">Select a subject</option>
                <option value="CSC">CSC - Computer Science</option>
                <option value="HESF">HESF - Health Exercise Studies Fitness</option>
                <option value="MA">Mathematics</option>
            </select>
        </form></body></html>"#;

        let subjects = parse_subject_options(html);
        let pairs: Vec<(&str, &str)> = subjects
            .iter()
            .map(|s| (s.prefix.as_str(), s.name.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("CSC", "Computer Science"),
                ("HESF", "Health Exercise Studies Fitness"),
                ("MA", "Mathematics"),
            ]
        );
    }

    #[test]
    fn test_page_without_subjects() {
        assert!(parse_subject_options("<html><body></body></html>").is_empty());
    }
}
