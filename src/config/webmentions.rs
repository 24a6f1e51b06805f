//! `[webmentions]` section configuration.
//!
//! Absent section means webmentions are disabled.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

/// `[webmentions]` section as declared.
///
/// # Example
/// ```toml
/// [webmentions]
/// link = "https://webmention.io/example.com/webmention"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebmentionsDeclaration {
    pub link: String,
}

/// Validated webmention endpoint.
///
/// `link` keeps the text as declared; `url` is its parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Webmentions {
    pub link: String,
    #[serde(skip)]
    pub url: Url,
}

impl TryFrom<WebmentionsDeclaration> for Webmentions {
    type Error = ConfigError;

    fn try_from(decl: WebmentionsDeclaration) -> Result<Self, Self::Error> {
        const FIELD: &str = "webmentions.link";

        let raw = decl.link.trim();
        if raw.is_empty() {
            return Err(ConfigError::validation(
                FIELD,
                "is required when [webmentions] is present",
            ));
        }

        let url = Url::parse(raw)
            .map_err(|e| ConfigError::validation(FIELD, format!("`{raw}` is not an absolute URL: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(ConfigError::validation(
                FIELD,
                format!("`{raw}` must be an http:// or https:// URL"),
            ));
        }

        Ok(Self {
            link: decl.link,
            url,
        })
    }
}
