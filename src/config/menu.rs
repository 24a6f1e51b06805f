//! `[[menu_links]]` navigation entries.
//!
//! The sequence order is the displayed navigation order and is kept as declared.

use super::build::TrailingSlash;
use super::error::{ConfigError, require_non_empty};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single navigation entry.
///
/// # Example
/// ```toml
/// [[menu_links]]
/// title = "Blog"
/// path = "/posts/"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuLink {
    /// Human-readable label.
    pub title: String,
    /// Site-root-relative route.
    pub path: String,
}

/// Validate navigation entries against the routing mode.
///
/// Errors name the entry by index, e.g. `menu_links[1].path`.
pub fn validate_menu_links(links: &[MenuLink], trailing: TrailingSlash) -> Result<(), ConfigError> {
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();

    for (i, link) in links.iter().enumerate() {
        require_non_empty(&link.title, &format!("menu_links[{i}].title"))?;

        let field = format!("menu_links[{i}].path");
        if !link.path.starts_with('/') {
            return Err(ConfigError::validation(
                field,
                format!("`{}` must start with `/`", link.path),
            ));
        }

        let is_root = link.path == "/";
        match trailing {
            TrailingSlash::Always if !link.path.ends_with('/') => {
                return Err(ConfigError::validation(
                    field,
                    format!("`{}` must end with `/` when trailing_slash = \"always\"", link.path),
                ));
            }
            TrailingSlash::Never if !is_root && link.path.ends_with('/') => {
                return Err(ConfigError::validation(
                    field,
                    format!("`{}` must not end with `/` when trailing_slash = \"never\"", link.path),
                ));
            }
            _ => {}
        }

        if let Some(first) = seen.insert(link.path.as_str(), i) {
            return Err(ConfigError::validation(
                field,
                format!("`{}` duplicates menu_links[{first}].path", link.path),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(title: &str, path: &str) -> MenuLink {
        MenuLink {
            title: title.into(),
            path: path.into(),
        }
    }

    #[test]
    fn test_valid_links() {
        let links = [link("Home", "/"), link("Blog", "/posts/"), link("About", "/about/")];
        assert!(validate_menu_links(&links, TrailingSlash::Ignore).is_ok());
        assert!(validate_menu_links(&links, TrailingSlash::Always).is_ok());
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(validate_menu_links(&[], TrailingSlash::Always).is_ok());
    }

    #[test]
    fn test_empty_title() {
        let links = [link("Home", "/"), link("", "/posts/")];
        let err = validate_menu_links(&links, TrailingSlash::Ignore).unwrap_err();
        assert_eq!(err.field(), Some("menu_links[1].title"));
    }

    #[test]
    fn test_relative_path() {
        let links = [link("Blog", "posts/")];
        let err = validate_menu_links(&links, TrailingSlash::Ignore).unwrap_err();
        assert_eq!(err.field(), Some("menu_links[0].path"));
        assert!(err.to_string().contains("must start with `/`"));
    }

    #[test]
    fn test_absolute_url_is_not_a_path() {
        let links = [link("Ext", "https://example.com/")];
        assert!(validate_menu_links(&links, TrailingSlash::Ignore).is_err());
    }

    #[test]
    fn test_duplicate_paths() {
        let links = [link("Blog", "/posts/"), link("Home", "/"), link("Writing", "/posts/")];
        let err = validate_menu_links(&links, TrailingSlash::Ignore).unwrap_err();
        assert_eq!(err.field(), Some("menu_links[2].path"));
        assert!(err.to_string().contains("menu_links[0].path"));
    }

    #[test]
    fn test_trailing_slash_always() {
        let links = [link("Home", "/"), link("Blog", "/posts")];
        let err = validate_menu_links(&links, TrailingSlash::Always).unwrap_err();
        assert_eq!(err.field(), Some("menu_links[1].path"));
    }

    #[test]
    fn test_trailing_slash_never() {
        let ok = [link("Home", "/"), link("Blog", "/posts")];
        assert!(validate_menu_links(&ok, TrailingSlash::Never).is_ok());

        let bad = [link("Blog", "/posts/")];
        let err = validate_menu_links(&bad, TrailingSlash::Never).unwrap_err();
        assert_eq!(err.field(), Some("menu_links[0].path"));
    }

    #[test]
    fn test_trailing_slash_ignore_accepts_mixed() {
        let links = [link("Blog", "/posts/"), link("About", "/about")];
        assert!(validate_menu_links(&links, TrailingSlash::Ignore).is_ok());
    }
}
