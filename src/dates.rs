//! Locale-aware date parsing and formatting.
//!
//! Timestamps arrive in several shapes: NewsAPI's RFC 3339 `publishedAt`,
//! GitHub's `published_at`, and bare `YYYY-MM-DD` dates cut out of release
//! names. [`parse_timestamp`] accepts all of them and [`format_date`] renders
//! the result the way each page expects:
//!
//! | Style | English | Chinese |
//! |-------|---------|---------|
//! | [`DateStyle::DateTime`] | `Jan 15, 2024, 10:30 AM` | `2024/1/15 10:30` |
//! | [`DateStyle::Date`] | `January 15, 2024` | `2024/1/15` |
//! | [`DateStyle::Long`] | `Monday, January 15, 2024` | `2024年1月15日星期一` |
//!
//! Wall-clock fields are taken in the timestamp's own offset; inputs without
//! an offset are read as UTC.

use crate::models::Language;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};

/// How much of a timestamp to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Date plus hour and minute (news cards).
    DateTime,
    /// Date only (archive rows).
    Date,
    /// Date with weekday and full month (page header).
    Long,
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-ish timestamp or date.
///
/// Returns `None` for anything that is not recognisably a date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| utc.from_utc_datetime(&naive))
}

/// The UTC calendar date of a timestamp, used to key release asset names.
pub fn utc_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Format `raw` for display in `language`.
///
/// Never fails: an unparseable input is returned unchanged and an empty input
/// yields an empty string.
pub fn format_date(raw: &str, language: Language, style: DateStyle) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format_parsed(&dt, language, style),
        None => raw.to_string(),
    }
}

/// Format an already-parsed date (e.g. "today" for the page header).
pub fn format_naive_date(date: NaiveDate, language: Language, style: DateStyle) -> String {
    match date.and_hms_opt(0, 0, 0) {
        Some(naive) => format_parsed(&Utc.from_utc_datetime(&naive).fixed_offset(), language, style),
        None => date.to_string(),
    }
}

fn format_parsed(dt: &DateTime<FixedOffset>, language: Language, style: DateStyle) -> String {
    match (language, style) {
        (Language::En, DateStyle::DateTime) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        (Language::En, DateStyle::Date) => dt.format("%B %-d, %Y").to_string(),
        (Language::En, DateStyle::Long) => dt.format("%A, %B %-d, %Y").to_string(),
        (Language::Zh, DateStyle::DateTime) => dt.format("%Y/%-m/%-d %H:%M").to_string(),
        (Language::Zh, DateStyle::Date) => dt.format("%Y/%-m/%-d").to_string(),
        (Language::Zh, DateStyle::Long) => format!(
            "{}年{}月{}日{}",
            dt.year(),
            dt.month(),
            dt.day(),
            zh_weekday(dt.weekday())
        ),
    }
}

fn zh_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_date_is_returned_unchanged() {
        for lang in Language::ALL {
            for style in [DateStyle::DateTime, DateStyle::Date, DateStyle::Long] {
                assert_eq!(format_date("not-a-date", lang, style), "not-a-date");
            }
        }
    }

    #[test]
    fn test_empty_date_formats_to_empty() {
        assert_eq!(format_date("", Language::En, DateStyle::DateTime), "");
        assert_eq!(format_date("", Language::Zh, DateStyle::Date), "");
    }

    #[test]
    fn test_datetime_style() {
        let raw = "2024-01-15T10:30:00Z";
        assert_eq!(
            format_date(raw, Language::En, DateStyle::DateTime),
            "Jan 15, 2024, 10:30 AM"
        );
        assert_eq!(
            format_date(raw, Language::Zh, DateStyle::DateTime),
            "2024/1/15 10:30"
        );
        assert_eq!(
            format_date("2024-03-05T21:07:00Z", Language::En, DateStyle::DateTime),
            "Mar 5, 2024, 09:07 PM"
        );
    }

    #[test]
    fn test_date_style_from_bare_date() {
        assert_eq!(
            format_date("2024-01-15", Language::En, DateStyle::Date),
            "January 15, 2024"
        );
        assert_eq!(
            format_date("2024-01-15", Language::Zh, DateStyle::Date),
            "2024/1/15"
        );
    }

    #[test]
    fn test_offset_is_kept_for_wall_clock() {
        assert_eq!(
            format_date("2024-01-15T23:30:00+08:00", Language::Zh, DateStyle::DateTime),
            "2024/1/15 23:30"
        );
    }

    #[test]
    fn test_naive_datetime_is_accepted() {
        assert_eq!(
            format_date("2024-01-15T08:05", Language::Zh, DateStyle::DateTime),
            "2024/1/15 08:05"
        );
    }

    #[test]
    fn test_long_style() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            format_naive_date(date, Language::En, DateStyle::Long),
            "Monday, January 15, 2024"
        );
        assert_eq!(
            format_naive_date(date, Language::Zh, DateStyle::Long),
            "2024年1月15日星期一"
        );
    }

    #[test]
    fn test_utc_date_crosses_midnight() {
        assert_eq!(
            utc_date("2024-01-16T01:00:00+08:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(utc_date("garbage"), None);
    }
}
