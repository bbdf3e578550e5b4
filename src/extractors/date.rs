// src/extractors/date.rs

// --- Imports ---
use chrono::{Local, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// --- Constants ---
/// Symbol that opens a header line; repeated for deeper levels.
pub const HEADER_MARKER: char = '#';

const FULL_MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
const SHORT_MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";
const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

// --- Regex Patterns (Lazy Static) ---
// "21st" -> "21". Fires on any number, including years.
static ORDINAL_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]+)(?:st|nd|rd|th)\b").expect("Failed to compile ORDINAL_SUFFIX_RE")
});

// Candidate layouts in priority order. Every pattern is anchored on both ends:
// the whole cleaned title has to be the date. A single space in a layout
// accepts a run of spaces, names are matched without regard to case.
static DATE_LAYOUTS: Lazy<Vec<DateLayout>> = Lazy::new(|| {
    [
        // 2006-01-02
        ("iso", r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})$".to_string()),
        // Monday, January 2, 2006
        (
            "weekday_full_month",
            format!(
                r"^(?i:{WEEKDAYS}), +(?P<month>(?i:{FULL_MONTHS})) +(?P<day>[0-9]{{1,2}}), +(?P<year>[0-9]{{4}})$"
            ),
        ),
        // January 2, 2006
        (
            "full_month",
            format!(r"^(?P<month>(?i:{FULL_MONTHS})) +(?P<day>[0-9]{{1,2}}), +(?P<year>[0-9]{{4}})$"),
        ),
        // Jan 2, 2006
        (
            "short_month_comma",
            format!(r"^(?P<month>(?i:{SHORT_MONTHS})) +(?P<day>[0-9]{{1,2}}), +(?P<year>[0-9]{{4}})$"),
        ),
        // Jan 2 2006
        (
            "short_month",
            format!(r"^(?P<month>(?i:{SHORT_MONTHS})) +(?P<day>[0-9]{{1,2}}) +(?P<year>[0-9]{{4}})$"),
        ),
        // 02 Jan 2006
        (
            "padded_day_short_month",
            format!(r"^(?P<day>[0-9]{{2}}) +(?P<month>(?i:{SHORT_MONTHS})) +(?P<year>[0-9]{{4}})$"),
        ),
        // 2 Jan 2006
        (
            "day_short_month",
            format!(r"^(?P<day>[0-9]{{1,2}}) +(?P<month>(?i:{SHORT_MONTHS})) +(?P<year>[0-9]{{4}})$"),
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| DateLayout {
        name,
        pattern: Regex::new(&pattern).expect("Failed to compile date layout"),
    })
    .collect()
});

// --- Data Structures ---
/// A calendar date with no time of day, rendered as `YYYY-MM-DD`.
///
/// Ordering follows the calendar, which agrees with ordering the canonical
/// strings since those are fixed-width and zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedDate(NaiveDate);

impl NormalizedDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in the local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses strictly canonical text (`2024-01-02`); nothing else is accepted.
    pub fn parse_canonical(text: &str) -> Option<Self> {
        DATE_LAYOUTS[0].parse(text)
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Inclusive range of dates. An inverted range (start after end) is legal and
/// simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NormalizedDate,
    end: NormalizedDate,
}

impl DateRange {
    pub fn new(start: NormalizedDate, end: NormalizedDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NormalizedDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

struct DateLayout {
    name: &'static str,
    pattern: Regex,
}

impl DateLayout {
    fn parse(&self, title: &str) -> Option<NormalizedDate> {
        let caps = self.pattern.captures(title)?;
        let year = caps.name("year")?.as_str().parse().ok()?;
        let month = month_number(caps.name("month")?.as_str())?;
        let day = caps.name("day")?.as_str().parse().ok()?;
        // Layout matched but the calendar rejects it (Feb 30, month 13, ...)
        NormalizedDate::from_ymd(year, month, day)
    }
}

fn month_number(text: &str) -> Option<u32> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        text.parse::<Month>().ok().map(|m| m.number_from_month())
    }
}

// --- Public API ---

/// Strips every leading header marker and the surrounding whitespace.
pub fn header_title(header_text: &str) -> &str {
    header_text.trim_start_matches(HEADER_MARKER).trim()
}

/// Extracts the date a header names, if its whole title is a date in one of
/// the supported layouts. Absence of a date is a normal outcome.
pub fn extract_date(header_text: &str) -> Option<NormalizedDate> {
    let title = header_title(header_text);
    let cleaned = ORDINAL_SUFFIX_RE.replace_all(title, "${1}");

    DATE_LAYOUTS.iter().find_map(|layout| {
        let date = layout.parse(&cleaned)?;
        tracing::trace!("Header '{}' parsed with layout '{}' as {}", title, layout.name, date);
        Some(date)
    })
}
