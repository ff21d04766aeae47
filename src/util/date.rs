//! Lenient calendar-date parsing and human-readable display.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{FormatItem, well_known::Rfc3339},
    macros::format_description,
};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

const DATE_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[year]/[month]/[day]"),
    format_description!("[year]/[month padding:none]/[day padding:none]"),
];

const DATETIME_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

/// Parse a calendar date from the formats authors actually write.
pub fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(trimmed, *format).ok())
    {
        return Some(date);
    }

    if let Ok(datetime) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(datetime.date());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(trimmed, *format).ok())
        .map(|datetime| datetime.date())
}

/// Format a raw date as "Month Day, Year".
///
/// Empty input yields an empty string; unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    parse_date(raw)
        .and_then(|date| date.format(HUMAN_DATE_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}
