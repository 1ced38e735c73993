//! Error types shared by the lyrics lookup and the track store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A recoverable failure from one step of a lyrics lookup.
///
/// None of these reach the caller of `LyricsResolver::resolve`; they are
/// logged and the lookup falls through to the next source.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The embedded tag is missing, unreadable or corrupt.
    #[error("no readable metadata in {}: {reason}", path.display())]
    MetadataUnavailable { path: PathBuf, reason: String },

    /// A directory or file could not be accessed.
    #[error("cannot access {}: {source}", path.display())]
    FilesystemUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A filename pattern could not be compiled.
    #[error("invalid match pattern `{pattern}`: {source}")]
    MalformedMatch {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl LookupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FilesystemUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Failures surfaced by a `TrackStore` write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
