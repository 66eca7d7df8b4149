//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.
//! Date and time values arrive from the backend as loosely formatted strings, so
//! the parsers here return `Option` and never fail loudly.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse a calendar date as sent by the backend
///
/// Accepts `YYYY-MM-DD` as well as full ISO-8601 timestamps, in which case the
/// date part is kept.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Parse a wall-clock time in `HH:MM` or `HH:MM:SS` form
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Combine separate date and time strings into a single local timestamp
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// Check that a strftime pattern parses and can render a bare calendar date
///
/// Time and offset directives parse fine but fail when applied to a
/// `NaiveDate`, so the pattern is tried against a sample date.
pub fn is_valid_date_format(format: &str) -> bool {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    NaiveDate::from_ymd_opt(2024, 1, 15).is_some_and(|sample| render_date(sample, format).is_some())
}

/// Render a date, `None` when the pattern needs fields a date lacks
fn render_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Renders backend date strings for display and text matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    format: String,
}

impl DateFormatter {
    pub const DEFAULT_FORMAT: &'static str = "%-m/%-d/%Y";

    pub fn new(format: impl Into<String>) -> Self {
        Self { format: format.into() }
    }

    /// Format a raw date string; values that do not parse or render are
    /// returned as-is
    pub fn format(&self, raw: &str) -> String {
        parse_date(raw)
            .and_then(|date| render_date(date, &self.format))
            .unwrap_or_else(|| raw.to_string())
    }

    /// Format a calendar date, falling back to ISO form
    pub fn format_date(&self, date: NaiveDate) -> String {
        render_date(date, &self.format).unwrap_or_else(|| date.to_string())
    }

    /// Format a timestamp using the same date pattern
    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        let mut out = String::new();
        match write!(out, "{}", instant.format(&self.format)) {
            Ok(()) => out,
            Err(_) => self.format_date(instant.date_naive()),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FORMAT)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Upper-case the first character of a word
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Quote a value for a CSV cell, doubling embedded quotes
pub fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Split a full name into first name and the remaining last name
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}
