//! Shared helpers for dates, ids and slugs.

pub mod date;
pub mod slug;
