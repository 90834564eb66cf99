//! Calendar helpers shared by the day query, the toggle and the summary.
//!
//! Week days are numbered from Sunday (0) to Saturday (6), the same
//! numbering SQLite's `strftime('%w', ...)` produces.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Today's date in the server's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn week_day(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_sunday())
}

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a `date` query value and truncates it to a calendar date.
///
/// Accepts `YYYY-MM-DD` and ISO 8601 date-times with or without seconds.
/// Date-times carrying an offset (`Z`, `+03:00`, `+0300`) are converted to
/// local time before truncation; naive ones are taken as local already.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Local).date_naive());
    }

    // chrono's `%z` has no `Z` shorthand
    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+0000"),
        None => raw.to_string(),
    };
    if let Some(stamp) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&zoned, format).ok())
    {
        return Some(stamp.with_timezone(&Local).date_naive());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
}
