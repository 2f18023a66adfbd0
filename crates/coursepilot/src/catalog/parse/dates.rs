//! Date span text such as `08/19/26 - 12/04/26`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{2}").unwrap());

/// Two-digit year format. chrono maps `00..=69` to 20xx and `70..=99` to 19xx.
const DATE_FORMAT: &str = "%m/%d/%y";

/// Extracts `(begin, end)` from free text.
///
/// The first `MM/DD/YY` token is the begin date and the second the end date;
/// any further tokens are ignored. A missing or invalid token leaves that date
/// unset.
pub fn parse_date_range(text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut tokens = DATE_REGEX.find_iter(text).map(|m| m.as_str());

    let begin = tokens.next().and_then(parse_date);
    let end = tokens.next().and_then(parse_date);

    if begin.is_none() {
        warn!(text = %text.trim(), "No begin date found in date range");
    } else if end.is_none() {
        warn!(text = %text.trim(), "No end date found in date range");
    }

    (begin, end)
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, DATE_FORMAT)
        .map_err(|e| warn!(token = %token, error = %e, "Invalid date in date range"))
        .ok()
}
