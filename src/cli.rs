//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldnotes: validate and export a markdown blog's config and posts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: fieldnotes.toml)
    #[arg(short = 'C', long, default_value = "fieldnotes.toml")]
    pub config: PathBuf,

    /// Content directory path (relative to site root), overrides `build.content`
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a starter site with a config file and an example post
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Load and validate the config and every post, then print a summary
    Check {
        /// Skip invalid posts instead of failing
        #[arg(short, long)]
        lenient: bool,
    },

    /// List posts, newest first
    List {
        /// Only posts carrying this tag (case-sensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Include drafts regardless of `build.drafts`
        #[arg(short, long)]
        drafts: bool,
    },

    /// List tags with their post counts
    Tags,

    /// Export site data as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip invalid posts instead of failing
        #[arg(short, long)]
        lenient: bool,
    },
}

impl Cli {
    /// Whether the command was asked to skip invalid posts.
    pub const fn is_lenient(&self) -> bool {
        matches!(
            self.command,
            Commands::Check { lenient: true } | Commands::Export { lenient: true, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from(["fieldnotes", "--root", "site", "export", "-o", "out.json", "--lenient"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("fieldnotes.toml"));
        assert!(cli.is_lenient());
        match cli.command {
            Commands::Export { output, .. } => assert_eq!(output, Some(PathBuf::from("out.json"))),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::parse_from(["fieldnotes", "-C", "site.toml", "list", "--tag", "rust", "--drafts"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(!cli.is_lenient());
        assert!(matches!(
            cli.command,
            Commands::List { tag: Some(ref t), drafts: true } if t == "rust"
        ));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["fieldnotes", "init", "blog"]);
        assert!(matches!(cli.command, Commands::Init { name: Some(ref n) } if n == &PathBuf::from("blog")));
    }
}
