//! Date normalization
//!
//! Bank exports mix several date representations in the same column. This
//! module parses them all into `chrono::NaiveDate`, a civil calendar date
//! with no time-of-day and no timezone. Building dates through a local
//! timezone is how statements end up shifted by a day, so nothing here ever
//! touches an instant or an offset.

use chrono::{Datelike, NaiveDate};

/// Three-letter English month abbreviations, in calendar order
const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Fallback formats tried when none of the known statement patterns match
const FALLBACK_FORMATS: [&str; 4] = [
    "%m/%d/%Y", // 01/15/2024
    "%m-%d-%Y", // 01-15-2024
    "%d %b %Y", // 15 Jan 2024
    "%B %d, %Y", // January 15, 2024
];

/// Parse a date string into a canonical calendar date.
///
/// Patterns are tried in a fixed priority order:
/// 1. `YYYY-M-D` (the canonical format, 1-2 digit month/day tolerated)
/// 2. `D/M/YY` or `D/M/YYYY` (2-digit years are 2000 + year)
/// 3. `D-Mon-YY` or `D-Mon-YYYY` (3-letter month, case-insensitive)
///
/// Anything else falls through to a short list of common formats. Returns
/// None for unmatched input and for dates that do not exist on the calendar
/// (e.g. day 31 in a 30-day month); callers treat None as "unparseable".
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = parse_canonical(s) {
        return Some(date);
    }
    if let Some(date) = parse_slash(s) {
        return Some(date);
    }
    if let Some(date) = parse_day_month_abbrev(s) {
        return Some(date);
    }

    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// `YYYY-M-D`: 4-digit year first, numeric month and day
fn parse_canonical(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `D/M/YY` or `D/M/YYYY`
fn parse_slash(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `D-Mon-YY` or `D-Mon-YYYY` with a 3-letter month abbreviation
fn parse_day_month_abbrev(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].trim().parse().ok()?;
    let month_str = parts[1].trim().to_lowercase();
    let month = MONTH_ABBREVS
        .iter()
        .position(|m| *m == month_str)
        .map(|i| i as u32 + 1)?;
    let year: i32 = parts[2].trim().parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Canonical zero-padded `YYYY-MM-DD` serialization
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Convert a canonical `YYYY-MM-DD` string to `MM/DD/YYYY` for display.
///
/// Works purely on substrings; reconstructing a date object here would
/// reintroduce the timezone round-trip this module exists to avoid.
/// Non-canonical input passes through unchanged.
pub fn format_display_date(canonical: &str) -> String {
    let parts: Vec<&str> = canonical.split('-').collect();
    if parts.len() == 3 && parts[0].len() == 4 {
        format!("{}/{}/{}", parts[1], parts[2], parts[0])
    } else {
        canonical.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_date("2025-03-01"), Some(d(2025, 3, 1)));
        // 1-2 digit month/day tolerated
        assert_eq!(parse_date("2025-3-1"), Some(d(2025, 3, 1)));
    }

    #[test]
    fn test_parse_slash_day_first() {
        assert_eq!(parse_date("01/03/2025"), Some(d(2025, 3, 1)));
        assert_eq!(parse_date("15/7/24"), Some(d(2024, 7, 15)));
        // 2-digit years are always 2000-based, never 1900-based
        assert_eq!(parse_date("1/1/99"), Some(d(2099, 1, 1)));
    }

    #[test]
    fn test_parse_month_abbrev() {
        assert_eq!(parse_date("15-Jul-24"), Some(d(2024, 7, 15)));
        assert_eq!(parse_date("15-JUL-2024"), Some(d(2024, 7, 15)));
        assert_eq!(parse_date("1-dec-25"), Some(d(2025, 12, 1)));
    }

    #[test]
    fn test_parse_fallback_formats() {
        assert_eq!(parse_date("01/15/2024".trim()), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("15 Jan 2024"), Some(d(2024, 1, 15)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date("invalid-date"), None);
        assert_eq!(parse_date(""), None);
        // Day 31 in a 30-day month does not exist
        assert_eq!(parse_date("2025-04-31"), None);
        assert_eq!(parse_date("31/4/2025"), None);
        // Not a leap year
        assert_eq!(parse_date("2025-02-29"), None);
    }

    #[test]
    fn test_round_trip_law() {
        // All representations of the same calendar day normalize identically
        for input in ["2024-07-15", "2024-7-15", "15/7/2024", "15/7/24", "15-Jul-24"] {
            let parsed = parse_date(input).unwrap();
            assert_eq!(format_date(parsed), "2024-07-15", "input: {}", input);
        }
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(d(2025, 3, 1)), "2025-03-01");
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2025-03-01"), "03/01/2025");
        // Non-canonical input passes through
        assert_eq!(format_display_date("garbage"), "garbage");
    }
}
