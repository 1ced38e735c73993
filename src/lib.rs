//! Music library aggregation and local lyrics resolution.
//!
//! - [`library`]: songs, albums, artists, genres and playlists, plus the
//!   `TrackStore` that supplies them.
//! - [`lyrics`]: lyrics lookup from embedded tags and sidecar files.
//! - [`format`]: display-string helpers.

pub mod config;
pub mod error;
pub mod format;
pub mod library;
pub mod logging;
pub mod lyrics;
pub mod runtime;

pub use error::{LookupError, StoreError};
pub use library::{Album, Artist, Genre, Playlist, PlaylistKind, Song, TrackStore};
pub use lyrics::LyricsResolver;
