//! Site data: the validated configuration and content handed to the renderer.
//!
//! # Export Shape
//!
//! ```json
//! {
//!   "site":  { "author": "...", "title": "...", "date": {...}, "menuLinks": [...] },
//!   "posts": [ { "id": "hello", "publishDate": "2023-12-14", "displayDate": "14 Dec 2023", ... } ],
//!   "tags":  [ { "name": "Rust", "slug": "rust", "count": 2 } ]
//! }
//! ```

use crate::config::{CONFIG_FILE, InvalidPolicy, SiteConfig};
use crate::content::{self, ContentCollection, ContentError, ContentItem};
use crate::log;
use crate::logger::ProgressBars;
use crate::utils::slug::tag_slug;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Where and how to load a site.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Site root; relative config and content paths resolve against it.
    pub root: PathBuf,
    /// Config file path, relative to `root` unless absolute.
    pub config_path: PathBuf,
    /// Overrides `build.content`.
    pub content_dir: Option<PathBuf>,
    /// Skip invalid items regardless of `build.on_invalid`.
    pub lenient: bool,
    /// Show a progress bar while content loads.
    pub progress: bool,
}

impl LoadOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_path: PathBuf::from(CONFIG_FILE),
            content_dir: None,
            lenient: false,
            progress: false,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        resolve(&self.root, &self.config_path)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Validated site configuration plus its content.
#[derive(Debug)]
pub struct SiteData {
    pub config: SiteConfig,
    pub posts: ContentCollection,
    /// Items dropped by the lenient policy.
    pub skipped: Vec<ContentError>,
}

impl SiteData {
    /// Load the configuration, then the content store.
    pub fn load(options: &LoadOptions) -> Result<Self> {
        let config_file = options.config_file();
        let config = SiteConfig::load(&config_file)
            .with_context(|| format!("Failed to load config `{}`", config_file.display()))?;

        let dir = match &options.content_dir {
            Some(dir) => resolve(&options.root, dir),
            None => config.content_dir(&options.root),
        };
        let policy = if options.lenient {
            InvalidPolicy::Skip
        } else {
            config.build.on_invalid
        };

        let files = content::collect_content_files(&dir)?;
        let progress = if options.progress {
            ProgressBars::new_filtered(&[("content", files.len())])
        } else {
            None
        };

        let report = content::load_content_files(&dir, &files, &config.date, policy, || {
            if let Some(progress) = &progress {
                progress.inc_by_name("content");
            }
        });
        if let Some(progress) = &progress {
            progress.finish();
        }
        let report = report.with_context(|| format!("Failed to load content from `{}`", dir.display()))?;

        let data = Self {
            config,
            posts: report.collection,
            skipped: report.skipped,
        };
        for (slug, names) in slug_collisions(&data.tags()) {
            log!("warn"; "tags {} share the slug `{slug}`", names.join(", "));
        }
        Ok(data)
    }

    /// Posts in listing order, honoring `build.drafts`.
    pub fn listed_posts(&self) -> Vec<&ContentItem> {
        self.posts.published(self.config.build.drafts)
    }

    /// Tags of listed posts with their counts, in name order.
    pub fn tags(&self) -> Vec<TagSummary<'_>> {
        self.posts
            .tag_counts(self.config.build.drafts)
            .into_iter()
            .map(|(name, count)| TagSummary {
                name,
                slug: tag_slug(name),
                count,
            })
            .collect()
    }

    /// Boundary record consumed by templates.
    pub fn export(&self) -> SiteExport<'_> {
        let posts = self
            .listed_posts()
            .into_iter()
            .map(|item| PostExport {
                item,
                display_date: self.config.date.format(item.publish_date),
                display_update_date: item.update_date.map(|d| self.config.date.format(d)),
            })
            .collect();

        SiteExport {
            site: &self.config,
            posts,
            tags: self.tags(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export()).context("Failed to serialize site data")
    }

    /// Hex blake3 digest of the JSON export.
    pub fn fingerprint(&self) -> Result<String> {
        let json = self.to_json()?;
        Ok(hex::encode(blake3::hash(json.as_bytes()).as_bytes()))
    }
}

// ============================================================================
// Export records
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SiteExport<'a> {
    pub site: &'a SiteConfig,
    pub posts: Vec<PostExport<'a>>,
    pub tags: Vec<TagSummary<'a>>,
}

/// A content item with its dates rendered under the site's date policy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostExport<'a> {
    #[serde(flatten)]
    pub item: &'a ContentItem,
    pub display_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_update_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary<'a> {
    pub name: &'a str,
    pub slug: String,
    pub count: usize,
}

/// Slugs claimed by more than one tag name, with those names in order.
///
/// Tags are case-sensitive but slugs are not, so `Rust` and `rust`, or
/// `C++` and `c`, would land on the same tag page.
pub fn slug_collisions<'t, 'a>(tags: &'t [TagSummary<'a>]) -> BTreeMap<&'t str, Vec<&'a str>> {
    let mut by_slug: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for tag in tags {
        by_slug.entry(tag.slug.as_str()).or_default().push(tag.name);
    }
    by_slug.retain(|_, names| names.len() > 1);
    by_slug
}

// ============================================================================
// Tests
// ============================================================================
