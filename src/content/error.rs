//! Content loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating content items.
///
/// Every item-level variant carries the item `id` so the offending post can
/// be located from the message alone.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory `{0}` does not exist")]
    MissingStore(PathBuf),

    #[error("IO error when reading `{id}` at `{path}`")]
    Io {
        id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Front matter block is not valid YAML or TOML.
    #[error("malformed front matter in `{id}`: {message}")]
    FrontMatter { id: String, message: String },

    /// A front-matter field breaks the content schema.
    #[error("content validation error in `{id}`, field `{field}`: {message}")]
    Validation {
        id: String,
        field: String,
        message: String,
    },

    #[error("duplicate content id `{id}`: `{first}` and `{second}`")]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    pub fn validation(
        id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            id: id.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Id of the item the error belongs to, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::MissingStore(_) => None,
            Self::Io { id, .. }
            | Self::FrontMatter { id, .. }
            | Self::Validation { id, .. }
            | Self::DuplicateId { id, .. } => Some(id),
        }
    }

    /// Name of the offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
