//! Content ids and URL slugs.
//!
//! Converts store paths to stable item ids and tag names to URL-safe slugs.

use deunicode::deunicode;
use std::path::{Component, Path};

/// Extensions recognized as content items
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// Name of the file that stands for its parent directory
const INDEX_STEM: &str = "index";

// ============================================================================
// Content Path Utilities
// ============================================================================

/// Whether `path` has a content extension.
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

/// Whether an entry name is excluded from the store (`_partial.md`, `.git`).
pub fn is_ignored_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Compute the stable id of a content file.
///
/// # Path Mapping Examples
///
/// | Source (relative to store) | id |
/// |----------------------------|----|
/// | `hello.md` | `hello` |
/// | `2023/hello.mdx` | `2023/hello` |
/// | `hello/index.md` | `hello` |
/// | `index.md` | `index` |
///
/// Returns `None` when `path` is not under `store`.
pub fn content_id(store: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(store).ok()?.with_extension("");

    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    // `foo/index.md` stands for `foo`; a top-level `index.md` keeps its name
    if parts.len() > 1 && parts.last().is_some_and(|last| last == INDEX_STEM) {
        parts.pop();
    }

    (!parts.is_empty()).then(|| parts.join("/"))
}

// ============================================================================
// Slugification
// ============================================================================

/// Convert a tag name to a lowercase ASCII slug.
///
/// Non-ASCII text is transliterated, runs of other characters collapse to
/// a single `-`. `"Rust & Web"` becomes `rust-web`, `"Café"` becomes `cafe`.
pub fn tag_slug(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    let mut pending_dash = false;

    for c in deunicode(tag).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_content_file() {
        assert!(is_content_file(Path::new("a/hello.md")));
        assert!(is_content_file(Path::new("hello.markdown")));
        assert!(is_content_file(Path::new("hello.mdx")));
        assert!(!is_content_file(Path::new("hello.txt")));
        assert!(!is_content_file(Path::new("hello")));
        assert!(!is_content_file(Path::new("hello.MD.bak")));
    }

    #[test]
    fn test_is_ignored_name() {
        assert!(is_ignored_name("_draft-partial.md"));
        assert!(is_ignored_name(".DS_Store"));
        assert!(!is_ignored_name("hello.md"));
    }

    #[test]
    fn test_content_id_simple() {
        let store = Path::new("content/posts");
        assert_eq!(content_id(store, Path::new("content/posts/hello.md")).as_deref(), Some("hello"));
        assert_eq!(
            content_id(store, Path::new("content/posts/2023/hello.mdx")).as_deref(),
            Some("2023/hello")
        );
    }

    #[test]
    fn test_content_id_index() {
        let store = PathBuf::from("/site/posts");
        assert_eq!(content_id(&store, &store.join("hello/index.md")).as_deref(), Some("hello"));
        assert_eq!(content_id(&store, &store.join("index.md")).as_deref(), Some("index"));
    }

    #[test]
    fn test_content_id_outside_store() {
        assert_eq!(content_id(Path::new("posts"), Path::new("other/hello.md")), None);
    }

    #[test]
    fn test_content_id_keeps_inner_dots() {
        let store = Path::new("posts");
        assert_eq!(content_id(store, Path::new("posts/v1.2-notes.md")).as_deref(), Some("v1.2-notes"));
    }

    #[test]
    fn test_tag_slug() {
        assert_eq!(tag_slug("Rust"), "rust");
        assert_eq!(tag_slug("Rust & Web"), "rust-web");
        assert_eq!(tag_slug("  spaced  out "), "spaced-out");
        assert_eq!(tag_slug("Café"), "cafe");
        assert_eq!(tag_slug("c++"), "c");
    }
}
