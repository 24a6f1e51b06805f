//! A single validated content item.

use super::error::ContentError;
use super::frontmatter::{RawFrontMatter, parse_front_matter};
use crate::config::DateConfig;
use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf};

/// One blog post: validated metadata plus the opaque body.
///
/// Serializes with camelCase keys and ISO dates, e.g.
/// `{"id": "hello", "publishDate": "2023-12-14", "tags": [], ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Store-relative path without extension (`posts/hello`).
    pub id: String,
    /// File the item was read from.
    #[serde(skip)]
    pub source: PathBuf,
    pub title: String,
    pub description: String,
    pub publish_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_date: Option<NaiveDate>,
    /// Declared order, no duplicates.
    pub tags: Vec<String>,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Front matter keys outside the schema, passed through.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
    /// Markdown after the front matter, untouched.
    pub body: String,
}

impl ContentItem {
    /// Parse and validate one content entry held in memory.
    pub fn parse(
        id: impl Into<String>,
        source: impl Into<PathBuf>,
        text: &str,
        dates: &DateConfig,
    ) -> Result<Self, ContentError> {
        let id = id.into();
        let (raw, body) = parse_front_matter(&id, text)?;
        let body = body.to_owned();
        Self::from_raw(id, source.into(), raw, body, dates)
    }

    /// Validate decoded front matter.
    ///
    /// Fields are checked in schema order: `title`, `description`,
    /// `publishDate`, `updateDate`, `tags`.
    pub fn from_raw(
        id: String,
        source: PathBuf,
        raw: RawFrontMatter,
        body: String,
        dates: &DateConfig,
    ) -> Result<Self, ContentError> {
        let RawFrontMatter {
            title,
            description,
            publish_date,
            update_date,
            tags,
            draft,
            og_image,
            extra,
        } = raw;

        let title = match title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ContentError::validation(id, "title", "is required and cannot be empty")),
        };
        let Some(description) = description else {
            return Err(ContentError::validation(id, "description", "is required"));
        };

        let Some(publish_raw) = publish_date else {
            return Err(ContentError::validation(id, "publishDate", "is required"));
        };
        let publish_date = parse_field(&id, "publishDate", &publish_raw, dates)?;

        let update_date = update_date
            .map(|raw| parse_field(&id, "updateDate", &raw, dates))
            .transpose()?;
        if let Some(updated) = update_date
            && updated < publish_date
        {
            return Err(ContentError::validation(
                id,
                "updateDate",
                format!("`{updated}` is earlier than publishDate `{publish_date}`"),
            ));
        }

        let tags = tags.unwrap_or_default();
        validate_tags(&id, &tags)?;

        Ok(Self {
            id,
            source,
            title,
            description,
            publish_date,
            update_date,
            tags,
            draft: draft.unwrap_or(false),
            og_image,
            extra,
            body,
        })
    }

    /// Most recent of the publish and update dates.
    pub fn last_updated(&self) -> NaiveDate {
        self.update_date.unwrap_or(self.publish_date)
    }

    /// Exact, case-sensitive tag match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn parse_field(id: &str, field: &str, raw: &str, dates: &DateConfig) -> Result<NaiveDate, ContentError> {
    dates
        .parse(raw)
        .ok_or_else(|| ContentError::validation(id, field, format!("`{raw}` is not a valid date")))
}

fn validate_tags(id: &str, tags: &[String]) -> Result<(), ContentError> {
    let mut seen = FxHashSet::default();
    for (i, tag) in tags.iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(ContentError::validation(id, "tags", format!("tag #{} is empty", i + 1)));
        }
        if !seen.insert(tag.as_str()) {
            return Err(ContentError::validation(id, "tags", format!("duplicate tag `{tag}`")));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
