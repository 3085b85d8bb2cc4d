//! Record dates
//!
//! Dates arrive as free text from front matter. They are kept verbatim on the
//! record and parsed on demand for sorting and display.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Parse a front matter date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Newest-first ordering of raw dates; unparsable dates compare as the earliest.
pub fn cmp_newest_first(a: &str, b: &str) -> Ordering {
    // `None < Some(_)`, so reversing puts invalid dates last.
    parse_date(b).cmp(&parse_date(a))
}

/// Format a date the way the site prints it: `2025년 6월 1일`.
///
/// Unparsable input is returned unchanged.
pub fn format_date_ko(s: &str) -> String {
    match parse_date(s) {
        Some(date) => format!("{}년 {}월 {}일", date.year(), date.month(), date.day()),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert_eq!(parse_date("2025-06-01"), expected);
        assert_eq!(parse_date(" 2025-06-01 "), expected);
        assert_eq!(parse_date("2025-06-01T10:30:00Z"), expected);
        assert_eq!(parse_date("2025-06-01T10:30:00"), expected);
        assert_eq!(parse_date("2025-06-01 10:30:00"), expected);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }

    #[test]
    fn test_newest_first() {
        assert_eq!(cmp_newest_first("2025-06-01", "2025-01-01"), Ordering::Less);
        assert_eq!(cmp_newest_first("2025-01-01", "2025-06-01"), Ordering::Greater);
        assert_eq!(cmp_newest_first("2025-01-01", "2025-01-01"), Ordering::Equal);
        assert_eq!(cmp_newest_first("garbage", "1970-01-01"), Ordering::Greater);
        assert_eq!(cmp_newest_first("", "garbage"), Ordering::Equal);
    }

    #[test]
    fn test_format_date_ko() {
        assert_eq!(format_date_ko("2025-06-01"), "2025년 6월 1일");
        assert_eq!(format_date_ko("2024-12-25T09:00:00Z"), "2024년 12월 25일");
        assert_eq!(format_date_ko("미정"), "미정");
    }
}
