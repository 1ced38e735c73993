//! Library entities: songs and the album/artist rollups derived from them.
//!
//! Everything here is a read-only projection of what a `TrackStore` returned.
//! Counts and names are recomputed on every call; nothing is cached.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::format::normalize_track_number;

/// Display name used for any artist whose tag says it is unknown.
pub const UNKNOWN_ARTIST_DISPLAY_NAME: &str = "Unknown Artist";

static EMPTY_ALBUM: Album = Album { songs: Vec::new() };

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub album_id: u64,
    pub album_name: String,
    /// Length in milliseconds.
    pub duration_ms: u64,
    /// Track number as tagged; may carry a disc prefix (see `track()`).
    pub track_number: u32,
    pub year: u32,
    /// Seconds since the Unix epoch at which the file entered the library.
    pub date_added: u64,
    pub path: PathBuf,
}

impl Song {
    /// Track number with any disc prefix removed.
    pub fn track(&self) -> u32 {
        normalize_track_number(self.track_number)
    }
}

/// An ordered run of songs sharing one album.
///
/// Album-level attributes are read off the first song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Album {
    pub songs: Vec<Song>,
}

impl Album {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    fn first_song(&self) -> Option<&Song> {
        self.songs.first()
    }

    pub fn id(&self) -> u64 {
        self.first_song().map(|s| s.album_id).unwrap_or(0)
    }

    pub fn title(&self) -> &str {
        self.first_song().map(|s| s.album_name.as_str()).unwrap_or("")
    }

    pub fn artist_id(&self) -> u64 {
        self.first_song().map(|s| s.artist_id).unwrap_or(0)
    }

    pub fn artist_name(&self) -> &str {
        self.first_song().map(|s| s.artist_name.as_str()).unwrap_or("")
    }

    pub fn year(&self) -> u32 {
        self.first_song().map(|s| s.year).unwrap_or(0)
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }
}

/// An artist as an ordered list of albums.
///
/// Identity comes from the first album: `id()` and `name()` read
/// `albums[0]`, so reordering `albums` changes who the artist appears to be.
/// With no albums an empty album stands in (id 0, empty name).
///
/// Two artists are equal iff their album lists are equal element-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Artist {
    pub albums: Vec<Album>,
}

impl Artist {
    pub fn new(albums: Vec<Album>) -> Self {
        Self { albums }
    }

    /// The album that defines this artist's identity.
    pub fn first_album(&self) -> &Album {
        self.albums.first().unwrap_or(&EMPTY_ALBUM)
    }

    pub fn id(&self) -> u64 {
        self.first_album().artist_id()
    }

    /// Artist name exactly as tagged on the first album.
    pub fn raw_name(&self) -> &str {
        self.first_album().artist_name()
    }

    /// Display name; unknown-artist spellings collapse to
    /// [`UNKNOWN_ARTIST_DISPLAY_NAME`].
    pub fn name(&self) -> &str {
        let name = self.raw_name();
        if is_artist_name_unknown(name) {
            UNKNOWN_ARTIST_DISPLAY_NAME
        } else {
            name
        }
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn song_count(&self) -> usize {
        self.albums.iter().map(Album::song_count).sum()
    }

    /// All songs, album by album.
    pub fn songs(&self) -> Vec<Song> {
        self.albums
            .iter()
            .flat_map(|a| a.songs.iter().cloned())
            .collect()
    }
}

/// Whether a tagged artist name means "unknown".
///
/// An empty name is not considered unknown.
pub fn is_artist_name_unknown(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name == UNKNOWN_ARTIST_DISPLAY_NAME {
        return true;
    }
    let name = name.trim().to_lowercase();
    name == "unknown" || name == "<unknown>"
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    pub song_count: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaylistKind {
    /// Most recently added songs, newest first.
    LastAdded,
    RecentlyPlayed,
    TopTracks,
    /// An ordinary playlist whose songs the store keeps by id.
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    pub kind: PlaylistKind,
}

impl Playlist {
    pub fn stored(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: PlaylistKind::Stored,
        }
    }

    /// One of the computed playlists. These have no stored id.
    pub fn synthetic(kind: PlaylistKind) -> Self {
        let name = match kind {
            PlaylistKind::LastAdded => "Last added",
            PlaylistKind::RecentlyPlayed => "Recently played",
            PlaylistKind::TopTracks => "Top tracks",
            PlaylistKind::Stored => "",
        };
        Self {
            id: 0,
            name: name.to_string(),
            kind,
        }
    }
}

/// Sum of song durations in milliseconds.
pub fn total_duration(songs: &[Song]) -> u64 {
    songs.iter().map(|s| s.duration_ms).sum()
}

/// Group songs into albums by album id.
///
/// Albums keep the order in which their first song appears; songs within an
/// album are ordered by track number (disc prefix ignored), then title.
pub fn group_albums(songs: &[Song]) -> Vec<Album> {
    let mut albums: Vec<Album> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();
    for song in songs {
        match index.get(&song.album_id).copied() {
            Some(i) => albums[i].songs.push(song.clone()),
            None => {
                index.insert(song.album_id, albums.len());
                albums.push(Album::new(vec![song.clone()]));
            }
        }
    }
    for album in &mut albums {
        album
            .songs
            .sort_by(|a, b| a.track().cmp(&b.track()).then_with(|| a.title.cmp(&b.title)));
    }
    albums
}

/// Group albums into artists by artist id, preserving first-seen order.
pub fn group_artists(albums: &[Album]) -> Vec<Artist> {
    let mut artists: Vec<Artist> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();
    for album in albums {
        match index.get(&album.artist_id()).copied() {
            Some(i) => artists[i].albums.push(album.clone()),
            None => {
                index.insert(album.artist_id(), artists.len());
                artists.push(Artist::new(vec![album.clone()]));
            }
        }
    }
    artists
}
