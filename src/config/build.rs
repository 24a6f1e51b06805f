//! `[build]` section configuration.
//!
//! Contains load settings: content location, draft handling, routing mode and
//! the policy applied to invalid content entries.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// Trailing-slash convention of the rendering framework's routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Every route ends with `/` (e.g., `/posts/`).
    Always,
    /// No route ends with `/`, except the root.
    Never,
    /// Either form is accepted (default).
    #[default]
    Ignore,
}

/// What to do when a content entry fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPolicy {
    /// Abort the load on the first invalid entry (default).
    #[default]
    Fail,
    /// Drop invalid entries, report them, and continue.
    Skip,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in fieldnotes.toml.
///
/// # Example
/// ```toml
/// [build]
/// content = "content/posts"   # Content store, relative to the site root
/// drafts = false              # Include drafts in listings
/// trailing_slash = "always"   # Routing mode menu links must follow
/// on_invalid = "skip"         # Lenient content loading
/// ```
///
/// Declared in snake_case, exported in camelCase like the rest of the site record.
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BuildConfig {
    /// Content store directory (markdown posts).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Include `draft: true` posts in listings.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub drafts: bool,

    /// Route trailing-slash convention.
    #[serde(default)]
    pub trailing_slash: TrailingSlash,

    /// Content error policy.
    #[serde(default)]
    pub on_invalid: InvalidPolicy,
}
