//! One `<tr>` of the section table.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use super::{cell_text, parse_availability, parse_date_range, parse_meeting_text};
use super::{CELL_SELECTOR, LINK_SELECTOR};
use crate::catalog::types::SectionDetail;

/// Rows with fewer cells are headers, footers or spacers.
const MIN_CELLS: usize = 8;

// Column layout of a section row. Column 2 (class number) is not used.
const COL_SECTION: usize = 0;
const COL_COMPONENT: usize = 1;
const COL_AVAILABILITY: usize = 3;
const COL_MEETING: usize = 4;
const COL_LOCATION: usize = 5;
const COL_INSTRUCTORS: usize = 6;
const COL_DATES: usize = 7;

/// Popover links carry their text in `data-content`, keyed by an `id` prefix.
static POPOVER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[data-content]").unwrap());

const NOTES_ID: &str = "notes";
const REQUISITES_ID: &str = "reqs";
const RESERVE_ID: &str = "reserve";

/// The course a section table belongs to, as given by the request.
#[derive(Debug, Clone, Copy)]
pub struct CourseRef<'a> {
    pub prefix: &'a str,
    pub number: &'a str,
}

/// Builds a section from one table row, or `None` if the row is too short.
///
/// The course identity always comes from `course`, never from the row.
pub fn parse_section_row(row: ElementRef, course: CourseRef) -> Option<SectionDetail> {
    let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < MIN_CELLS {
        debug!(cells = cells.len(), "Skipping short row in section table");
        return None;
    }

    let number = cell_text(cells[COL_SECTION]);
    let component = cell_text(cells[COL_COMPONENT]);
    let availability = parse_availability(cells[COL_AVAILABILITY]);
    let schedule = parse_meeting_text(&cell_text(cells[COL_MEETING]));
    let location = cell_text(cells[COL_LOCATION]);
    let (begin, end) = parse_date_range(&cell_text(cells[COL_DATES]));

    let instructors = cells[COL_INSTRUCTORS]
        .select(&LINK_SELECTOR)
        .map(cell_text)
        .filter(|name| !name.is_empty())
        .collect();

    let popovers = parse_popovers(row);

    Some(SectionDetail {
        course_prefix: course.prefix.to_string(),
        course_number: course.number.to_string(),
        number,
        component,
        availability,
        recitations: None,
        schedule,
        location,
        instructors,
        begin,
        end,
        restrictions: popovers.restrictions,
        notes: popovers.notes,
        requisites: popovers.requisites,
    })
}

#[derive(Debug, Default)]
struct Popovers {
    notes: Option<String>,
    requisites: Option<String>,
    restrictions: Vec<String>,
}

/// Reads the notes, requisites and reservation popovers of a row.
fn parse_popovers(row: ElementRef) -> Popovers {
    let mut popovers = Popovers::default();

    for link in row.select(&POPOVER_SELECTOR) {
        let Some(id) = link.value().attr("id") else {
            continue;
        };
        let content = popover_text(link.value().attr("data-content").unwrap_or_default());
        if content.is_empty() {
            continue;
        }

        if id.starts_with(NOTES_ID) {
            popovers.notes = Some(content);
        } else if id.starts_with(REQUISITES_ID) {
            popovers.requisites = Some(content);
        } else if id.starts_with(RESERVE_ID) {
            popovers.restrictions.push(content);
        } else {
            debug!(id = %id, "Ignoring unknown popover");
        }
    }

    popovers
}

/// Popover content may hold markup; only its text is kept.
fn popover_text(content: &str) -> String {
    Html::parse_fragment(content)
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
