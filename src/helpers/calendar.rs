//! Add-to-calendar links

use super::date::{parse_instant, utc_basic};
use super::url::encode_component;

const GOOGLE_CALENDAR_RENDER: &str = "https://calendar.google.com/calendar/render";

/// Placeholder embedded when a start or end instant cannot be parsed
const INVALID_DATE: &str = "Invalid Date";

/// Fields needed to prefill a calendar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEvent<'a> {
    pub title: &'a str,
    pub details: &'a str,
    pub location: &'a str,
    pub start: &'a str,
    pub end: &'a str,
}

/// Build a Google Calendar "add event" URL.
///
/// Instants are rendered in UTC basic format; anything unparseable is
/// embedded as `Invalid Date` instead of failing.
pub fn google_calendar_url(event: &CalendarEvent<'_>) -> String {
    let dates = format!("{}/{}", calendar_instant(event.start), calendar_instant(event.end));

    format!(
        "{}?action=TEMPLATE&text={}&details={}&location={}&dates={}",
        GOOGLE_CALENDAR_RENDER,
        encode_component(event.title),
        encode_component(event.details),
        encode_component(event.location),
        encode_component(&dates),
    )
}

fn calendar_instant(value: &str) -> String {
    parse_instant(value)
        .map(|date| utc_basic(&date))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}
