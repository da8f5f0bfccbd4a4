use std::borrow::Cow;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Maximum body characters shown on a card before truncation
pub const PREVIEW_MAX_CHARS: usize = 250;

/// Card preview of a stored body: the first 250 characters, with `...`
/// appended when anything was cut.
pub fn truncate_preview(body: &str) -> Cow<'_, str> {
    match body.char_indices().nth(PREVIEW_MAX_CHARS) {
        None => Cow::Borrowed(body),
        Some((cut, _)) => Cow::Owned(format!("{}...", &body[..cut])),
    }
}

/// Render a server timestamp as a short `d/m/yyyy` date.
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS[.f]` values; anything
/// else is returned unchanged.
pub fn format_date(timestamp: &str) -> String {
    match parse_date(timestamp) {
        Some(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        None => timestamp.to_string(),
    }
}

fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    let trimmed = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
