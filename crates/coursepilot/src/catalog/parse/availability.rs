//! Availability cell: a status label element plus a `open / max` seat fraction.

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;
use tracing::warn;

use super::cell_text;
use crate::catalog::types::Availability;

static SEAT_FRACTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").unwrap());

/// Parses an availability cell.
///
/// The status label is the text of the first element nested in the cell. Seat
/// counts default to zero when no fraction is present. The search results
/// never expose a waitlist count, so `waitlisted` is always zero.
pub fn parse_availability(cell: ElementRef) -> Availability {
    let status = cell
        .child_elements()
        .next()
        .map(cell_text)
        .unwrap_or_default();

    if status.is_empty() {
        warn!("Availability cell has no status label");
    }

    let text = cell_text(cell);
    let (open_seats, max_seats) = parse_seat_fraction(&text).unwrap_or_else(|| {
        warn!(text = %text, "Availability cell has no seat fraction, defaulting to 0/0");
        (0, 0)
    });

    Availability {
        status,
        open_seats,
        max_seats,
        waitlisted: 0,
    }
}

/// Extracts the first `x / y` fraction from free text.
pub fn parse_seat_fraction(text: &str) -> Option<(u32, u32)> {
    let caps = SEAT_FRACTION_REGEX.captures(text)?;
    let open = caps[1].parse::<u32>().ok()?;
    let max = caps[2].parse::<u32>().ok()?;
    Some((open, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse::tests::with_cell;

    #[test]
    fn test_parse_open_section() {
        with_cell(r#"<span class="text-success">open</span> 12 / 150"#, |cell| {
            let availability = parse_availability(cell);
            assert_eq!(
                availability,
                Availability {
                    status: "open".to_string(),
                    open_seats: 12,
                    max_seats: 150,
                    waitlisted: 0,
                }
            );
        });
    }

    #[test]
    fn test_parse_compact_fraction_and_nested_label() {
        with_cell(
            r#"<div class="badge"><strong>Waitlist</strong></div><br>0/40 (5)"#,
            |cell| {
                let availability = parse_availability(cell);
                assert_eq!(availability.status, "Waitlist");
                assert_eq!(availability.open_seats, 0);
                assert_eq!(availability.max_seats, 40);
                assert_eq!(availability.waitlisted, 0);
            },
        );
    }

    #[test]
    fn test_missing_fraction_defaults_to_zero() {
        with_cell(r#"<span>Closed</span> n/a"#, |cell| {
            let availability = parse_availability(cell);
            assert_eq!(availability.status, "Closed");
            assert_eq!(availability.open_seats, 0);
            assert_eq!(availability.max_seats, 0);
        });
    }

    #[test]
    fn test_missing_label_is_empty_status() {
        with_cell("3 / 30", |cell| {
            let availability = parse_availability(cell);
            assert_eq!(availability.status, "");
            assert_eq!(availability.open_seats, 3);
            assert_eq!(availability.max_seats, 30);
        });
    }

    #[test]
    fn test_parse_seat_fraction_overflow_is_none() {
        assert_eq!(parse_seat_fraction("99999999999 / 1"), None);
        assert_eq!(parse_seat_fraction("12 /150"), Some((12, 150)));
    }
}
