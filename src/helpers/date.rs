//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a CMS timestamp.
///
/// Accepts RFC 3339 and the zone-less `YYYY-MM-DDTHH:MM:SS` / date-only
/// forms Directus uses for `datetime` and `date` fields, read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort key for `date_created`: milliseconds since the epoch, with
/// missing or unparseable values pinned to the epoch itself
pub fn timestamp_millis(value: Option<&str>) -> i64 {
    value
        .and_then(parse_instant)
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a raw CMS timestamp for display, passing unparseable input through
pub fn display_date(value: &str, format: &str) -> String {
    match parse_instant(value) {
        Some(date) => format_date(&date, format),
        None => value.to_string(),
    }
}

/// Format an instant in UTC basic format (`20240701T100000Z`)
pub fn utc_basic(date: &DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each group
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-07-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_instant("2024-07-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_instant("2024-07-01T10:00:00"), Some(expected));
        assert_eq!(parse_instant("2024-07-01T10:00:00.000"), Some(expected));
        assert_eq!(
            parse_instant("2024-07-01"),
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_instant("next tuesday"), None);
    }

    #[test]
    fn test_timestamp_millis_fallback() {
        assert_eq!(timestamp_millis(None), 0);
        assert_eq!(timestamp_millis(Some("garbage")), 0);
        assert_eq!(timestamp_millis(Some("1970-01-01T00:00:01Z")), 1000);
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "MMMM DD, YYYY"), "January 15, 2024");
        assert_eq!(format_date(&date, "HH:mm"), "10:30");
    }

    #[test]
    fn test_display_date_passthrough() {
        assert_eq!(display_date("2024-01-15T10:30:00Z", "YYYY/MM/DD"), "2024/01/15");
        assert_eq!(display_date("soon", "YYYY/MM/DD"), "soon");
    }

    #[test]
    fn test_utc_basic() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        assert_eq!(utc_basic(&date), "20240701T100000Z");
    }
}
