//! Site initialization module.
//!
//! Creates a starter site: a config file and one example post.

use crate::config::{CONFIG_FILE, defaults};
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use std::{fs, path::Path};

/// Starter configuration, valid as written.
const STARTER_CONFIG: &str = r#"[base]
author = "Your Name"
title = "Field Notes"
description = "Notes from the field"
lang = "en-IN"
og_locale = "en_IN"

[date]
locale = "en-IN"

[date.options]
day = "numeric"
month = "short"
year = "numeric"

# [webmentions]
# link = "https://webmention.io/example.com/webmention"

[[menu_links]]
title = "Home"
path = "/"

[[menu_links]]
title = "Blog"
path = "/posts/"

[build]
content = "content/posts"
drafts = false
trailing_slash = "ignore"
on_invalid = "fail"
"#;

/// File name of the example post
const STARTER_POST: &str = "hello-world.md";

/// Create a new site at `root`.
///
/// Without a site name the directory must be empty, so an existing site is
/// never overwritten.
pub fn new_site(root: &Path, has_name: bool) -> Result<()> {
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `fieldnotes init <SITE_NAME>` to create in a subdirectory."
        );
    }

    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("Config file already exists. Remove it manually or init in a different path.");
    }

    let content_dir = root.join(defaults::build::content());
    if content_dir.exists() {
        bail!(
            "Path `{}` already exists. Try `fieldnotes init <SITE_NAME>` instead.",
            content_dir.display()
        );
    }

    fs::create_dir_all(&content_dir)
        .with_context(|| format!("Failed to create {}", content_dir.display()))?;
    fs::write(&config_path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    fs::write(content_dir.join(STARTER_POST), starter_post(Local::now().date_naive()))?;

    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

fn starter_post(today: NaiveDate) -> String {
    format!(
        "---\n\
         title: Hello, world\n\
         description: The first post on this site.\n\
         publishDate: {today}\n\
         tags: [meta]\n\
         ---\n\
         \n\
         Write your first post here.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentItem;
    use tempfile::TempDir;

    #[test]
    fn test_starter_config_is_valid() {
        let config: SiteConfig = STARTER_CONFIG.parse().unwrap();
        assert_eq!(config.base.lang, "en-IN");
        assert_eq!(config.menu_links.len(), 2);
        assert!(!config.webmentions_enabled());
    }

    #[test]
    fn test_starter_post_is_valid() {
        let config: SiteConfig = STARTER_CONFIG.parse().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let item = ContentItem::parse("hello-world", STARTER_POST, &starter_post(today), &config.date).unwrap();
        assert_eq!(item.publish_date, today);
        assert_eq!(item.tags, ["meta"]);
    }

    #[test]
    fn test_new_site_writes_files() {
        let dir = TempDir::new().unwrap();
        new_site(dir.path(), false).unwrap();
        assert!(dir.path().join(CONFIG_FILE).is_file());
        assert!(dir.path().join("content/posts").join(STARTER_POST).is_file());
    }

    #[test]
    fn test_new_site_refuses_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        assert!(new_site(dir.path(), false).is_err());
    }

    #[test]
    fn test_new_site_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        let err = new_site(dir.path(), true).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
