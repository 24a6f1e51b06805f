//! fieldnotes - validate and export a markdown blog's config and posts.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use fieldnotes::{
    content::ContentItem,
    init::new_site,
    log,
    site::{LoadOptions, SiteData},
};
use std::{fs, path::Path};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));

    match &cli.command {
        Commands::Init { name } => {
            let target = name.as_ref().map_or_else(|| root.to_path_buf(), |name| root.join(name));
            new_site(&target, name.is_some())?;
            log!("init"; "created site at `{}`", target.display());
            Ok(())
        }
        Commands::Check { .. } => {
            check(&load_site(&cli, root)?);
            Ok(())
        }
        Commands::List { tag, drafts } => {
            list(&load_site(&cli, root)?, tag.as_deref(), *drafts);
            Ok(())
        }
        Commands::Tags => {
            tags(&load_site(&cli, root)?);
            Ok(())
        }
        Commands::Export { output, .. } => {
            let data = load_site(&cli, root)?;
            let json = data.to_json()?;
            match output {
                Some(path) => {
                    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
                    log!("export"; "wrote {} posts to `{}`", data.listed_posts().len(), path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

/// Load config and content as the CLI arguments describe
fn load_site(cli: &Cli, root: &Path) -> Result<SiteData> {
    let options = LoadOptions {
        root: root.to_path_buf(),
        config_path: cli.config.clone(),
        content_dir: cli.content.clone(),
        lenient: cli.is_lenient(),
        progress: true,
    };
    SiteData::load(&options)
}

fn check(data: &SiteData) {
    let drafts = data.posts.iter().filter(|item| item.draft).count();
    log!(
        "check";
        "`{}` by {}: {} posts ({} drafts), {} tags, {} menu links",
        data.config.base.title,
        data.config.base.author,
        data.posts.len(),
        drafts,
        data.tags().len(),
        data.config.menu_links.len()
    );
    if let Some(webmentions) = &data.config.webmentions {
        log!("check"; "webmentions enabled at {}", webmentions.link);
    }
    if !data.skipped.is_empty() {
        log!("warn"; "skipped {} invalid posts", data.skipped.len());
    }
}

fn list(data: &SiteData, tag: Option<&str>, drafts: bool) {
    let include_drafts = drafts || data.config.build.drafts;
    let posts = match tag {
        Some(tag) => data.posts.tagged(tag, include_drafts),
        None => data.posts.published(include_drafts),
    };

    for item in posts {
        println!("{}", list_line(data, item));
    }
}

fn list_line(data: &SiteData, item: &ContentItem) -> String {
    let date = data.config.date.format(item.publish_date);
    let marker = if item.draft { " [draft]" } else { "" };
    format!("{date}\t{}\t{}{marker}", item.id, item.title)
}

fn tags(data: &SiteData) {
    for tag in data.tags() {
        println!("{}\t{}\t{}", tag.name, tag.slug, tag.count);
    }
}
