//! Content store loading.
//!
//! The store is a directory of markdown files, one [`ContentItem`] each.
//!
//! # Load Flow
//!
//! ```text
//! collect_content_files() ──► par_iter parse ──► duplicate check ──► ContentCollection
//!        │                          │                   │
//!        ▼                          ▼                   ▼
//!   sorted paths             Result per file      policy: fail | skip
//! ```

mod error;
mod frontmatter;
mod item;

pub use error::ContentError;
pub use frontmatter::{FrontMatterFormat, RawFrontMatter, Split, parse_front_matter, split_front_matter};
pub use item::ContentItem;

use crate::config::{DateConfig, InvalidPolicy, SiteConfig};
use crate::log;
use crate::utils::slug::{content_id, is_content_file, is_ignored_name};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

// ============================================================================
// Collection
// ============================================================================

/// Validated content items keyed by id.
///
/// Stored in id order; use [`chronological`](Self::chronological) for the
/// listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentCollection {
    items: Vec<ContentItem>,
}

impl ContentCollection {
    /// Build a collection, rejecting two items with the same id.
    pub fn from_items(mut items: Vec<ContentItem>) -> Result<Self, ContentError> {
        items.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = items.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(ContentError::DuplicateId {
                id: pair[0].id.clone(),
                first: pair[0].source.clone(),
                second: pair[1].source.clone(),
            });
        }

        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items
            .binary_search_by(|item| item.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.items[i])
    }

    /// All items, newest first. Ties are broken by id ascending.
    pub fn chronological(&self) -> Vec<&ContentItem> {
        let mut items: Vec<_> = self.items.iter().collect();
        // items are already in id order and the sort is stable
        items.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        items
    }

    /// Listing order, drafts removed unless `include_drafts`.
    pub fn published(&self, include_drafts: bool) -> Vec<&ContentItem> {
        self.chronological()
            .into_iter()
            .filter(|item| include_drafts || !item.draft)
            .collect()
    }

    /// Listed items carrying `tag` (case-sensitive).
    pub fn tagged(&self, tag: &str, include_drafts: bool) -> Vec<&ContentItem> {
        self.published(include_drafts)
            .into_iter()
            .filter(|item| item.has_tag(tag))
            .collect()
    }

    /// Number of listed items per tag, in tag name order.
    pub fn tag_counts(&self, include_drafts: bool) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for item in self.items.iter().filter(|item| include_drafts || !item.draft) {
            for tag in &item.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ContentCollection {
    type Item = &'a ContentItem;
    type IntoIter = std::slice::Iter<'a, ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Outcome of loading a content store.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub collection: ContentCollection,
    /// Errors of items dropped under [`InvalidPolicy::Skip`], in path order.
    pub skipped: Vec<ContentError>,
}

// ============================================================================
// Loading
// ============================================================================

/// Load every content item of the site.
///
/// Resolves the store from `build.content` and applies `build.on_invalid`.
/// `on_item` runs once per parsed file, from worker threads.
pub fn load_all_content_items(
    config: &SiteConfig,
    root: &Path,
    on_item: impl Fn() + Sync,
) -> Result<LoadReport, ContentError> {
    let dir = config.content_dir(root);
    load_content_dir(&dir, &config.date, config.build.on_invalid, on_item)
}

/// Load all content items under `dir`.
pub fn load_content_dir(
    dir: &Path,
    dates: &DateConfig,
    policy: InvalidPolicy,
    on_item: impl Fn() + Sync,
) -> Result<LoadReport, ContentError> {
    let files = collect_content_files(dir)?;
    load_content_files(dir, &files, dates, policy, on_item)
}

/// Collect content files under `dir`, sorted by path.
///
/// Entries whose name starts with `_` or `.` are skipped, directories
/// included. Symlinks are followed. An unreadable entry, a dangling link or
/// a link loop is an error.
pub fn collect_content_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        return Err(ContentError::MissingStore(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_name(&e.file_name().to_string_lossy()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| walk_error(dir, err))?;
        if entry.file_type().is_file() && is_content_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn walk_error(dir: &Path, err: walkdir::Error) -> ContentError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    let id = content_id(dir, &path).unwrap_or_else(|| path.to_string_lossy().into_owned());
    ContentError::Io {
        id,
        path,
        source: err.into(),
    }
}

/// Parse `files` in parallel and assemble the collection.
///
/// Under [`InvalidPolicy::Fail`] the first error in path order is returned.
/// Under [`InvalidPolicy::Skip`] invalid items are logged and reported.
pub fn load_content_files(
    dir: &Path,
    files: &[PathBuf],
    dates: &DateConfig,
    policy: InvalidPolicy,
    on_item: impl Fn() + Sync,
) -> Result<LoadReport, ContentError> {
    let parsed: Vec<Result<ContentItem, ContentError>> = files
        .par_iter()
        .map(|path| {
            let result = load_item(dir, path, dates);
            on_item();
            result
        })
        .collect();

    let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();
    let mut items = Vec::with_capacity(parsed.len());
    let mut skipped = Vec::new();

    for result in parsed {
        let checked = result.and_then(|item| match seen.get(&item.id) {
            Some(first) => Err(ContentError::DuplicateId {
                id: item.id.clone(),
                first: first.clone(),
                second: item.source.clone(),
            }),
            None => {
                seen.insert(item.id.clone(), item.source.clone());
                Ok(item)
            }
        });

        match (checked, policy) {
            (Ok(item), _) => items.push(item),
            (Err(e), InvalidPolicy::Fail) => return Err(e),
            (Err(e), InvalidPolicy::Skip) => {
                log!("warn"; "skipping: {e}");
                skipped.push(e);
            }
        }
    }

    Ok(LoadReport {
        collection: ContentCollection::from_items(items)?,
        skipped,
    })
}

fn load_item(dir: &Path, path: &Path, dates: &DateConfig) -> Result<ContentItem, ContentError> {
    let id = content_id(dir, path).unwrap_or_else(|| path.to_string_lossy().into_owned());
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        id: id.clone(),
        path: path.to_path_buf(),
        source,
    })?;
    ContentItem::parse(id, path, &text, dates)
}

// ============================================================================
// Tests
// ============================================================================
