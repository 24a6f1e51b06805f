//! Calendar date parsing and display formatting.
//!
//! Dates are plain calendar days (`NaiveDate`); no timezone is involved.
//! Timestamps are accepted on input and truncated to their date part.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Textual forms accepted regardless of locale.
const TEXTUAL_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y"];

/// Order of day, month and year parts for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `14 Dec 2023`, `14/12/2023`
    DayMonthYear,
    /// `Dec 14, 2023`, `12/14/2023`
    MonthDayYear,
    /// `2023 Dec 14`, `2023/12/14`
    YearMonthDay,
}

impl DateOrder {
    /// Derive part order from a locale tag such as `en-IN`, `en_US` or `ja`.
    pub fn from_locale(locale: &str) -> Self {
        let mut subtags = locale.split(['-', '_']);
        let lang = subtags.next().unwrap_or_default().to_ascii_lowercase();
        let region = subtags
            .find(|s| s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_uppercase);

        match (lang.as_str(), region.as_deref()) {
            ("zh" | "ja" | "ko", _) => Self::YearMonthDay,
            (_, Some("US")) | ("en", None) => Self::MonthDayYear,
            _ => Self::DayMonthYear,
        }
    }

    /// strftime pattern for the all-numeric slash form.
    const fn numeric_format(self) -> &'static str {
        match self {
            Self::DayMonthYear => "%d/%m/%Y",
            Self::MonthDayYear => "%m/%d/%Y",
            Self::YearMonthDay => "%Y/%m/%d",
        }
    }
}

/// Parse a calendar date.
///
/// Accepted, in order:
/// - ISO `2023-12-14`
/// - RFC 3339 / ISO timestamps `2023-12-14T10:00:00Z`, `2023-12-14T10:00:00`
/// - textual `14 Dec 2023`, `14 December 2023`, `Dec 14, 2023`, `December 14, 2023`
/// - numeric slash form ordered by `order`
pub fn parse_date(s: &str, order: DateOrder) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    TEXTUAL_FORMATS
        .iter()
        .chain(std::iter::once(&order.numeric_format()))
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTHS_LONG[(month.clamp(1, 12) - 1) as usize]
}

/// Three-letter English month abbreviation.
pub fn month_abbrev(month: u32) -> &'static str {
    &month_name(month)[..3]
}

/// Single-letter English month initial.
pub fn month_initial(month: u32) -> &'static str {
    &month_name(month)[..1]
}
