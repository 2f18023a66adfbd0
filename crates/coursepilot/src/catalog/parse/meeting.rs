//! Meeting text such as `meets M meets W 9:35 AM - 10:25 AM`, or `TBD`.

use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::catalog::types::{Schedule, TBD_DAY};

static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2})\s*([AP]M)\s*-\s*(\d{1,2}:\d{2})\s*([AP]M)").unwrap()
});

/// Token that precedes every meeting day in the upstream text.
const DAY_MARKER: &str = "meets";

/// Parses meeting text into a schedule.
///
/// Never fails: text without day markers yields no days, and text without a
/// time range yields no times.
pub fn parse_meeting_text(text: &str) -> Schedule {
    let text = text.trim();
    if text == TBD_DAY {
        return Schedule::tbd();
    }

    let mut days = Vec::new();
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == DAY_MARKER {
            if let Some(day) = tokens.next() {
                days.push(day.to_string());
            }
        }
    }

    if days.is_empty() {
        debug!(text = %text, "No meeting days found in meeting text");
    }

    let (start, end) = match TIME_RANGE_REGEX.captures(text) {
        Some(caps) => (
            parse_clock_time(&caps[1], &caps[2]),
            parse_clock_time(&caps[3], &caps[4]),
        ),
        None => {
            warn!(text = %text, "Meeting text has no time range, leaving times unset");
            (None, None)
        }
    };

    Schedule { days, start, end }
}

/// Parses a 12-hour clock time split into its `H:MM` and `AM`/`PM` parts.
fn parse_clock_time(clock: &str, meridiem: &str) -> Option<NaiveTime> {
    let value = format!("{} {}", clock, meridiem.to_uppercase());
    match NaiveTime::parse_from_str(&value, "%I:%M %p") {
        Ok(time) => Some(time),
        Err(e) => {
            warn!(value = %value, error = %e, "Invalid clock time in meeting text");
            None
        }
    }
}
