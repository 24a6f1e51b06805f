//! `[date]` section configuration.
//!
//! The date policy governs how every displayed date is rendered across the
//! site, and which date strings the content loader accepts.
//!
//! # Example
//! ```toml
//! [date]
//! locale = "en-IN"
//!
//! [date.options]
//! day = "numeric"
//! month = "short"
//! year = "numeric"
//! ```

use super::error::{ConfigError, require_non_empty};
use crate::utils::date::{self as dates, DateOrder};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Display styles
// ============================================================================

/// Display style for one date part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayStyle {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "narrow")]
    Narrow,
}

impl DisplayStyle {
    /// Styles valid for `day` and `year`.
    pub const NUMERIC: &'static [Self] = &[Self::Numeric, Self::TwoDigit];

    /// Styles valid for `month`.
    pub const MONTH: &'static [Self] = &[
        Self::Numeric,
        Self::TwoDigit,
        Self::Short,
        Self::Long,
        Self::Narrow,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::TwoDigit => "2-digit",
            Self::Short => "short",
            Self::Long => "long",
            Self::Narrow => "narrow",
        }
    }

    /// Look up `name` within `allowed`.
    fn parse_within(name: &str, allowed: &[Self]) -> Option<Self> {
        allowed.iter().copied().find(|s| s.as_str() == name)
    }

    const fn is_textual(self) -> bool {
        matches!(self, Self::Short | Self::Long | Self::Narrow)
    }
}

impl fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Declarations (as written in fieldnotes.toml)
// ============================================================================

/// `[date]` section as declared. Validated into [`DateConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateDeclaration {
    pub locale: String,
    pub options: DateOptionsDeclaration,
}

/// `[date.options]` switches with raw style names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateOptionsDeclaration {
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

// ============================================================================
// Validated configuration
// ============================================================================

/// Validated date formatting policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateConfig {
    /// Region tag used for part ordering (e.g., "en-IN").
    pub locale: String,
    /// Enabled date parts and their styles.
    pub options: DateOptions,
}

/// Enabled date parts. At least one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<DisplayStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<DisplayStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<DisplayStyle>,
}

impl TryFrom<DateDeclaration> for DateConfig {
    type Error = ConfigError;

    fn try_from(decl: DateDeclaration) -> Result<Self, Self::Error> {
        require_non_empty(&decl.locale, "date.locale")?;

        let DateOptionsDeclaration { day, month, year } = decl.options;
        if day.is_none() && month.is_none() && year.is_none() {
            return Err(ConfigError::validation(
                "date.options",
                "is required and must set at least one of `day`, `month`, `year`",
            ));
        }

        let options = DateOptions {
            day: resolve_style(day.as_deref(), "date.options.day", DisplayStyle::NUMERIC)?,
            month: resolve_style(month.as_deref(), "date.options.month", DisplayStyle::MONTH)?,
            year: resolve_style(year.as_deref(), "date.options.year", DisplayStyle::NUMERIC)?,
        };

        Ok(Self {
            locale: decl.locale,
            options,
        })
    }
}

/// Resolve an optional style name against the styles its field accepts.
fn resolve_style(
    name: Option<&str>,
    field: &str,
    allowed: &[DisplayStyle],
) -> Result<Option<DisplayStyle>, ConfigError> {
    let Some(name) = name else {
        return Ok(None);
    };

    DisplayStyle::parse_within(name, allowed)
        .map(Some)
        .ok_or_else(|| {
            let expected = allowed
                .iter()
                .map(|s| format!("`{s}`"))
                .collect::<Vec<_>>()
                .join(", ");
            ConfigError::validation(
                field,
                format!("unrecognized style `{name}`, expected one of {expected}"),
            )
        })
}

impl DateConfig {
    /// Part order implied by the configured locale.
    pub fn order(&self) -> DateOrder {
        DateOrder::from_locale(&self.locale)
    }

    /// Parse a date string under this policy.
    pub fn parse(&self, s: &str) -> Option<NaiveDate> {
        dates::parse_date(s, self.order())
    }

    /// Render a date for display.
    ///
    /// With a textual month: `14 Dec 2023` (or `Dec 14, 2023` for US-ordered
    /// locales). With a numeric month the parts are slash separated.
    pub fn format(&self, date: NaiveDate) -> String {
        let DateOptions { day, month, year } = self.options;

        let day = day.map(|style| match style {
            DisplayStyle::TwoDigit => format!("{:02}", date.day()),
            _ => date.day().to_string(),
        });
        let month_text = month.map(|style| match style {
            DisplayStyle::Numeric => date.month().to_string(),
            DisplayStyle::TwoDigit => format!("{:02}", date.month()),
            DisplayStyle::Short => dates::month_abbrev(date.month()).to_owned(),
            DisplayStyle::Long => dates::month_name(date.month()).to_owned(),
            DisplayStyle::Narrow => dates::month_initial(date.month()).to_owned(),
        });
        let year = year.map(|style| match style {
            DisplayStyle::TwoDigit => format!("{:02}", date.year().rem_euclid(100)),
            _ => date.year().to_string(),
        });

        let textual = month.is_some_and(DisplayStyle::is_textual);
        let order = self.order();

        if textual && order == DateOrder::MonthDayYear {
            let head = [month_text, day].into_iter().flatten().collect::<Vec<_>>().join(" ");
            return match year {
                Some(year) if head.contains(' ') => format!("{head}, {year}"),
                Some(year) => format!("{head} {year}"),
                None => head,
            };
        }

        let parts = match order {
            DateOrder::DayMonthYear => [day, month_text, year],
            DateOrder::MonthDayYear => [month_text, day, year],
            DateOrder::YearMonthDay => [year, month_text, day],
        };
        let separator = if textual { " " } else { "/" };
        parts.into_iter().flatten().collect::<Vec<_>>().join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(locale: &str, day: Option<&str>, month: Option<&str>, year: Option<&str>) -> DateDeclaration {
        DateDeclaration {
            locale: locale.into(),
            options: DateOptionsDeclaration {
                day: day.map(Into::into),
                month: month.map(Into::into),
                year: year.map(Into::into),
            },
        }
    }

    fn config(locale: &str, day: Option<&str>, month: Option<&str>, year: Option<&str>) -> DateConfig {
        DateConfig::try_from(decl(locale, day, month, year)).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_toml_section() {
        let decl: DateDeclaration = toml::from_str(
            r#"
            locale = "en-IN"
            [options]
            day = "numeric"
            month = "short"
            year = "numeric"
        "#,
        )
        .unwrap();

        let config = DateConfig::try_from(decl).unwrap();
        assert_eq!(config.locale, "en-IN");
        assert_eq!(config.options.day, Some(DisplayStyle::Numeric));
        assert_eq!(config.options.month, Some(DisplayStyle::Short));
        assert_eq!(config.options.year, Some(DisplayStyle::Numeric));
    }

    #[test]
    fn test_unknown_switch_rejected_by_parser() {
        let result: Result<DateDeclaration, _> = toml::from_str(
            r#"
            locale = "en-IN"
            [options]
            weekday = "long"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_locale() {
        let err = DateConfig::try_from(decl("", Some("numeric"), None, None)).unwrap_err();
        assert_eq!(err.field(), Some("date.locale"));
    }

    #[test]
    fn test_empty_options() {
        let err = DateConfig::try_from(decl("en-IN", None, None, None)).unwrap_err();
        assert_eq!(err.field(), Some("date.options"));
    }

    #[test]
    fn test_unrecognized_style_names_field() {
        let err = DateConfig::try_from(decl("en-IN", Some("numeric"), Some("tiny"), None)).unwrap_err();
        assert_eq!(err.field(), Some("date.options.month"));
        assert!(err.to_string().contains("tiny"));
    }

    #[test]
    fn test_textual_style_not_valid_for_day_or_year() {
        let err = DateConfig::try_from(decl("en-IN", Some("short"), None, None)).unwrap_err();
        assert_eq!(err.field(), Some("date.options.day"));

        let err = DateConfig::try_from(decl("en-IN", None, None, Some("long"))).unwrap_err();
        assert_eq!(err.field(), Some("date.options.year"));
    }

    #[test]
    fn test_style_names_are_case_sensitive() {
        let err = DateConfig::try_from(decl("en-IN", Some("Numeric"), None, None)).unwrap_err();
        assert_eq!(err.field(), Some("date.options.day"));
    }

    #[test]
    fn test_format_day_month_year_short() {
        let config = config("en-IN", Some("numeric"), Some("short"), Some("numeric"));
        assert_eq!(config.format(ymd(2023, 12, 14)), "14 Dec 2023");
        assert_eq!(config.format(ymd(2024, 3, 4)), "4 Mar 2024");
    }

    #[test]
    fn test_format_us_textual() {
        let config = config("en-US", Some("numeric"), Some("long"), Some("numeric"));
        assert_eq!(config.format(ymd(2023, 12, 14)), "December 14, 2023");

        let config = self::config("en-US", None, Some("short"), Some("numeric"));
        assert_eq!(config.format(ymd(2023, 12, 14)), "Dec 2023");
    }

    #[test]
    fn test_format_numeric_parts() {
        let config = config("en-GB", Some("2-digit"), Some("2-digit"), Some("numeric"));
        assert_eq!(config.format(ymd(2024, 3, 4)), "04/03/2024");

        let config = self::config("en-US", Some("numeric"), Some("numeric"), Some("2-digit"));
        assert_eq!(config.format(ymd(2024, 3, 4)), "3/4/24");

        let config = self::config("ja-JP", Some("2-digit"), Some("2-digit"), Some("numeric"));
        assert_eq!(config.format(ymd(2024, 3, 4)), "2024/03/04");
    }

    #[test]
    fn test_format_narrow_month() {
        let config = config("en-IN", Some("numeric"), Some("narrow"), None);
        assert_eq!(config.format(ymd(2024, 9, 1)), "1 S");
    }

    #[test]
    fn test_formatted_dates_parse_back() {
        let config = config("en-IN", Some("numeric"), Some("short"), Some("numeric"));
        let date = ymd(2023, 12, 14);
        assert_eq!(config.parse(&config.format(date)), Some(date));

        let config = self::config("en-US", Some("numeric"), Some("long"), Some("numeric"));
        assert_eq!(config.parse(&config.format(date)), Some(date));
    }

    #[test]
    fn test_serialize_style_names() {
        let config = config("en-IN", Some("2-digit"), Some("short"), None);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["options"]["day"], "2-digit");
        assert_eq!(json["options"]["month"], "short");
        assert!(json["options"].get("year").is_none());
    }
}
