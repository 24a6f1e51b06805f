//! Front matter splitting and decoding.
//!
//! A content file opens with a metadata block fenced by `---` (YAML) or
//! `+++` (TOML). The fences must sit on their own lines; everything after
//! the closing fence is the body.

use super::error::ContentError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Metadata block format, chosen by the opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// YAML fenced by `---`.
    Yaml,
    /// TOML fenced by `+++`.
    Toml,
}

impl FrontMatterFormat {
    pub const fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn from_fence(line: &str) -> Option<Self> {
        match line {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A file cut into its metadata block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub format: FrontMatterFormat,
    pub front_matter: &'a str,
    pub body: &'a str,
}

/// Cut `text` at its front matter fences.
///
/// Returns `Ok(None)` when the file has no opening fence, and an error
/// message when the opening fence is never closed.
pub fn split_front_matter(text: &str) -> Result<Option<Split<'_>>, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(None);
    };
    let Some(format) = FrontMatterFormat::from_fence(trim_eol(first)) else {
        return Ok(None);
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if trim_eol(line) == format.delimiter() {
            let front_matter = &text[start..offset];
            let body = text[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok(Some(Split {
                format,
                front_matter,
                body,
            }));
        }
        offset += line.len();
    }

    Err(format!("missing closing `{}`", format.delimiter()))
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

// ============================================================================
// Raw metadata
// ============================================================================

/// Front matter as written, before validation.
///
/// Keys are camelCase; the snake_case and legacy spellings are accepted as
/// aliases. Unrecognized keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "publish_date", alias = "pubDate", alias = "date")]
    pub publish_date: Option<String>,
    #[serde(alias = "update_date", alias = "updatedDate")]
    pub update_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub draft: Option<bool>,
    #[serde(alias = "og_image")]
    pub og_image: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RawFrontMatter {
    /// Decode a metadata block in the given format.
    pub fn decode(format: FrontMatterFormat, block: &str) -> Result<Self, String> {
        if block.trim().is_empty() {
            return Ok(Self::default());
        }

        match format {
            FrontMatterFormat::Yaml => serde_yaml::from_str(block).map_err(|e| e.to_string()),
            FrontMatterFormat::Toml => {
                let mut table: toml::Table = toml::from_str(block).map_err(|e| e.to_string())?;
                table.iter_mut().for_each(|(_, v)| stringify_datetimes(v));
                toml::Value::Table(table)
                    .try_into()
                    .map_err(|e: toml::de::Error| e.to_string())
            }
        }
    }
}

/// Replace TOML datetimes with their textual form so they read like any
/// other date string.
fn stringify_datetimes(value: &mut toml::Value) {
    match value {
        toml::Value::Datetime(dt) => *value = toml::Value::String(dt.to_string()),
        toml::Value::Array(items) => items.iter_mut().for_each(stringify_datetimes),
        toml::Value::Table(table) => table.iter_mut().for_each(|(_, v)| stringify_datetimes(v)),
        _ => {}
    }
}

/// Split and decode the front matter of one item.
///
/// A file without a fence yields empty metadata and the whole text as body.
pub fn parse_front_matter<'a>(id: &str, text: &'a str) -> Result<(RawFrontMatter, &'a str), ContentError> {
    let malformed = |message: String| ContentError::FrontMatter {
        id: id.to_owned(),
        message,
    };

    match split_front_matter(text).map_err(malformed)? {
        Some(split) => {
            let raw = RawFrontMatter::decode(split.format, split.front_matter).map_err(malformed)?;
            Ok((raw, split.body))
        }
        None => Ok((RawFrontMatter::default(), text)),
    }
}

// ============================================================================
// Tests
// ============================================================================
