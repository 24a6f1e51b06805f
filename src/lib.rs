//! fieldnotes - site configuration and post collection loader for a markdown blog.
//!
//! Loads `fieldnotes.toml` into a validated [`SiteConfig`](config::SiteConfig)
//! and a directory of markdown posts into a
//! [`ContentCollection`](content::ContentCollection). The pair is exported as
//! [`SiteData`](site::SiteData) for an external renderer.

pub mod config;
pub mod content;
pub mod init;
pub mod logger;
pub mod site;
pub mod utils;
