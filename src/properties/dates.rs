//! Year formatting for knowledge-base time values
//!
//! Time values look like `+1850-00-00T00:00:00Z`: a signed year and zero
//! month/day when the precision is coarser than a day.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Format a time value as a four-digit year
///
/// `-00` becomes `-01`, the first `Z` and first `+` are removed, and the
/// remainder is parsed as a datetime, a date or a bare year. Anything else
/// is returned unchanged.
pub fn format_wiki_year(raw: &str) -> String {
    let cleaned = raw
        .replace("-00", "-01")
        .replacen('Z', "", 1)
        .replacen('+', "", 1);
    let cleaned = cleaned.trim();

    match parse_year(cleaned) {
        Some(year) => format!("{:04}", year),
        None => raw.to_string(),
    }
}

fn parse_year(text: &str) -> Option<i32> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.year());
    }
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok();
    }
    None
}
