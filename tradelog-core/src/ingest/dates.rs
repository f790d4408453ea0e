//! Date normalization to `YYYY-MM-DD`.
//!
//! Spreadsheet exports write dates however the sheet's locale felt like it
//! that day. Unparseable text is returned unchanged so the evidence stays
//! on the record.

use crate::domain::DATE_FORMAT;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%a %b %d %Y",
    "%a, %b %d, %Y",
];

/// Date-time layouts; only the calendar day is kept.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// `%Y` accepts short years, so "01/05/24" would otherwise read as year 1.
fn plausible(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

/// Parse a free-form calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive()).filter(plausible);
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok().filter(plausible))
        .or_else(|| {
            DATETIME_LAYOUTS.iter().find_map(|layout| {
                NaiveDateTime::parse_from_str(text, layout)
                    .ok()
                    .map(|dt| dt.date())
                    .filter(plausible)
            })
        })
}

/// Normalize a date cell: parsed → `YYYY-MM-DD`, blank → "", otherwise the
/// trimmed original text.
pub fn normalize_date(raw: &str) -> String {
    match parse_calendar_date(raw) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => raw.trim().to_string(),
    }
}
