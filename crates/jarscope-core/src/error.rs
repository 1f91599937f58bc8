//! Error types for archive navigation operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `NavigationError`.
pub type Result<T> = std::result::Result<T, NavigationError>;

/// Errors that can occur while opening, walking, or saving archives.
///
/// Several failure classes deliberately do *not* surface here: a corrupt
/// nested archive yields an empty child list, a malformed address resolves
/// to "not found", and a registry lookup with no matching provider returns
/// `None`. Only genuine I/O and top-level open failures become errors.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not an archive any registered container factory accepts.
    #[error("unsupported container format: {path}")]
    UnsupportedFormat {
        /// The path that could not be opened as a container.
        path: PathBuf,
    },

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// A path names no entry in its container.
    #[error("entry not found: {path}")]
    EntryNotFound {
        /// The container-relative path that failed to resolve.
        path: String,
    },

    /// An address string failed to parse.
    #[error("malformed uri `{input}`: {reason}")]
    MalformedUri {
        /// The input that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A byte-read was requested on a directory entry.
    #[error("not a file: {path}")]
    NotAFile {
        /// The container-relative path of the directory entry.
        path: String,
    },
}

impl NavigationError {
    /// Returns `true` if this error indicates corrupt or unreadable
    /// archive bytes.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::InvalidArchive(_))
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::MalformedUri { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
