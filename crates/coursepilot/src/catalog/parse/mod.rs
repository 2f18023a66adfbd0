//! HTML extraction for catalog search fragments.
//!
//! Everything here is a pure transform from markup to records. Sub-parsers
//! degrade to empty/zero/absent values and emit a `tracing` event instead of
//! failing; only a fragment without its course section or section table is an
//! error.

mod availability;
mod dates;
mod index;
mod meeting;
mod row;
mod table;

pub use availability::{parse_availability, parse_seat_fraction};
pub use dates::parse_date_range;
pub use index::parse_subject_options;
pub use meeting::parse_meeting_text;
pub use row::{parse_section_row, CourseRef};
pub use table::{assemble_sections, parse_course_fragment, parse_course_headers, CourseHeader};

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

pub(crate) static COURSE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.course").unwrap());
pub(crate) static SECTION_TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.section-table").unwrap());
pub(crate) static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
pub(crate) static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
pub(crate) static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Text content of an element with runs of whitespace collapsed to one space.
pub(crate) fn cell_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
