//! Site configuration management for `fieldnotes.toml`.
//!
//! The file is parsed into a [`SiteDeclaration`] (the shape as written) and
//! validated into a [`SiteConfig`]. A `SiteConfig` is immutable once built and
//! is passed explicitly to every consumer.
//!
//! # Sections
//!
//! | Section           | Purpose                                        |
//! |-------------------|------------------------------------------------|
//! | `[base]`          | Site metadata (author, title, locales)         |
//! | `[date]`          | Date display policy                            |
//! | `[webmentions]`   | Optional webmention endpoint                   |
//! | `[[menu_links]]`  | Ordered navigation entries                     |
//! | `[build]`         | Content location, drafts, routing, error policy|
//! | `[extra]`         | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! author = "A"
//! title = "T"
//! description = "D"
//! lang = "en-IN"
//! og_locale = "en_IN"
//!
//! [date]
//! locale = "en-IN"
//! options = { day = "numeric", month = "short", year = "numeric" }
//!
//! [[menu_links]]
//! title = "Home"
//! path = "/"
//!
//! [[menu_links]]
//! title = "Blog"
//! path = "/posts/"
//! ```

mod base;
mod build;
pub mod defaults;
mod date;
mod error;
mod menu;
mod webmentions;

pub use base::{BaseConfig, locales_agree};
pub use build::{BuildConfig, InvalidPolicy, TrailingSlash};
pub use date::{DateConfig, DateDeclaration, DateOptions, DateOptionsDeclaration, DisplayStyle};
pub use error::ConfigError;
pub use menu::{MenuLink, validate_menu_links};
pub use webmentions::{Webmentions, WebmentionsDeclaration};

use error::require_non_empty;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default config filename.
pub const CONFIG_FILE: &str = "fieldnotes.toml";

// ============================================================================
// Declaration
// ============================================================================

/// fieldnotes.toml exactly as written, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDeclaration {
    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub date: DateDeclaration,

    #[serde(default)]
    pub webmentions: Option<WebmentionsDeclaration>,

    #[serde(default, alias = "menuLinks")]
    pub menu_links: Vec<MenuLink>,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub extra: toml::Table,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Validated site configuration.
///
/// Serializes flat (`author`, `title`, `ogLocale`, `date`, `menuLinks`, ...),
/// which is the record templates consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Basic site information
    #[serde(flatten)]
    pub base: BaseConfig,

    /// Date display policy
    pub date: DateConfig,

    /// Webmention endpoint; `None` disables the feature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webmentions: Option<Webmentions>,

    /// Navigation entries in display order
    pub menu_links: Vec<MenuLink>,

    /// Load settings
    pub build: BuildConfig,

    /// User-defined extra fields
    pub extra: toml::Table,
}

impl SiteConfig {
    /// Load and validate configuration from file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        content.parse()
    }

    /// Validate a parsed declaration.
    ///
    /// Sections are checked in file order: `base`, `date`, `webmentions`,
    /// `menu_links`, `build`. The first violation is returned.
    pub fn from_declaration(decl: SiteDeclaration) -> Result<Self, ConfigError> {
        let SiteDeclaration {
            base,
            date,
            webmentions,
            menu_links,
            build,
            extra,
        } = decl;

        base.validate()?;
        let date = DateConfig::try_from(date)?;
        let webmentions = webmentions.map(Webmentions::try_from).transpose()?;
        validate_menu_links(&menu_links, build.trailing_slash)?;
        require_non_empty(&build.content.to_string_lossy(), "build.content")?;

        Ok(Self {
            base,
            date,
            webmentions,
            menu_links,
            build,
            extra,
        })
    }

    /// Resolve the content store directory against the site root.
    ///
    /// `~` is expanded; absolute paths are used as-is.
    pub fn content_dir(&self, root: &Path) -> PathBuf {
        let raw = self.build.content.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        if expanded.is_absolute() {
            expanded
        } else {
            root.join(expanded)
        }
    }

    /// Whether webmentions are enabled.
    pub fn webmentions_enabled(&self) -> bool {
        self.webmentions.is_some()
    }
}

impl FromStr for SiteConfig {
    type Err = ConfigError;

    /// Parse and validate configuration from a TOML string.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let decl: SiteDeclaration = toml::from_str(content)?;
        Self::from_declaration(decl)
    }
}

// ============================================================================
// Tests
// ============================================================================
