use crate::error::StoreError;

use super::model::{Album, Artist, Genre, Playlist, Song, group_albums, group_artists};

/// Source of raw library records.
///
/// Implementors supply songs, genres and playlist contents; album and artist
/// rollups are derived from `songs()` unless overridden.
pub trait TrackStore {
    fn songs(&self) -> Vec<Song>;

    fn genres(&self) -> Vec<Genre>;

    /// Songs of `playlist`. Computed playlists are evaluated on each call.
    fn playlist_songs(&self, playlist: &Playlist) -> Vec<Song>;

    /// Remove `songs` from the store, returning how many were removed.
    fn delete_songs(&mut self, songs: &[Song]) -> Result<usize, StoreError>;

    fn albums(&self) -> Vec<Album> {
        group_albums(&self.songs())
    }

    fn artists(&self) -> Vec<Artist> {
        group_artists(&self.albums())
    }
}
