use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use lofty::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::StoreError;

use super::model::{Genre, Playlist, PlaylistKind, Song};
use super::store::TrackStore;

/// Placeholder for a missing artist or album tag.
pub const UNKNOWN_TAG: &str = "<unknown>";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn non_blank(v: impl AsRef<str>) -> Option<String> {
    let v = v.as_ref().trim();
    (!v.is_empty()).then(|| v.to_string())
}

fn modified_secs(path: &Path) -> u64 {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Tag fields read from one file, before ids are assigned.
struct RawTrack {
    path: PathBuf,
    title: String,
    artist: String,
    album: String,
    genre: Option<String>,
    duration: Duration,
    track_number: u32,
    year: u32,
    date_added: u64,
}

fn read_track(path: &Path) -> RawTrack {
    let mut track = RawTrack {
        path: path.to_path_buf(),
        title: path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string(),
        artist: UNKNOWN_TAG.to_string(),
        album: UNKNOWN_TAG.to_string(),
        genre: None,
        duration: Duration::ZERO,
        track_number: 0,
        year: 0,
        date_added: modified_secs(path),
    };

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            track.duration = tagged.properties().duration();

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().and_then(non_blank) {
                    track.title = v;
                }
                if let Some(v) = tag.artist().and_then(non_blank) {
                    track.artist = v;
                }
                if let Some(v) = tag.album().and_then(non_blank) {
                    track.album = v;
                }
                track.genre = tag.genre().and_then(non_blank);
                track.track_number = tag.track().unwrap_or(0);
                track.year = tag.year().unwrap_or(0);
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    track
}

struct Entry {
    song: Song,
    genre: Option<String>,
}

/// A `TrackStore` backed by a directory scan.
///
/// Songs get ids from 1 in sorted order. Artists are keyed by name and
/// albums by (artist, album) name, each numbered by first appearance.
/// Play history is not tracked, so the recently-played and top-tracks
/// playlists are always empty, as are stored playlists.
pub struct FsTrackStore {
    root: PathBuf,
    entries: Vec<Entry>,
}

impl FsTrackStore {
    pub fn scan(dir: &Path, settings: &LibrarySettings) -> Self {
        let mut raw: Vec<RawTrack> = Vec::new();

        let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
            {
                raw.push(read_track(path));
            }
        }

        raw.sort_by_cached_key(|t| {
            (
                format!("{} - {}", t.artist, t.title).to_lowercase(),
                t.path.clone(),
            )
        });

        let mut artist_ids: HashMap<String, u64> = HashMap::new();
        let mut album_ids: HashMap<(String, String), u64> = HashMap::new();

        let entries: Vec<Entry> = raw
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                let next_artist = artist_ids.len() as u64 + 1;
                let artist_id = *artist_ids.entry(t.artist.clone()).or_insert(next_artist);
                let next_album = album_ids.len() as u64 + 1;
                let album_id = *album_ids
                    .entry((t.artist.clone(), t.album.clone()))
                    .or_insert(next_album);

                Entry {
                    song: Song {
                        id: i as u64 + 1,
                        title: t.title,
                        artist_id,
                        artist_name: t.artist,
                        album_id,
                        album_name: t.album,
                        duration_ms: t.duration.as_millis() as u64,
                        track_number: t.track_number,
                        year: t.year,
                        date_added: t.date_added,
                        path: t.path,
                    },
                    genre: t.genre,
                }
            })
            .collect();

        info!(root = %dir.display(), songs = entries.len(), "library scanned");

        Self {
            root: dir.to_path_buf(),
            entries,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look a song up by path. Paths that differ only by `..` components or
    /// symlinks are matched on their canonical form.
    pub fn song_by_path(&self, path: &Path) -> Option<&Song> {
        let songs = || self.entries.iter().map(|e| &e.song);
        if let Some(song) = songs().find(|s| s.path == path) {
            return Some(song);
        }
        let wanted = fs::canonicalize(path).ok()?;
        songs().find(|s| fs::canonicalize(&s.path).is_ok_and(|p| p == wanted))
    }

    fn last_added(&self) -> Vec<Song> {
        let mut songs = self.songs();
        songs.sort_by(|a, b| b.date_added.cmp(&a.date_added).then(a.id.cmp(&b.id)));
        songs
    }
}

impl TrackStore for FsTrackStore {
    fn songs(&self) -> Vec<Song> {
        self.entries.iter().map(|e| e.song.clone()).collect()
    }

    fn genres(&self) -> Vec<Genre> {
        let mut genres: Vec<Genre> = Vec::new();
        for name in self.entries.iter().filter_map(|e| e.genre.as_deref()) {
            match genres.iter_mut().find(|g| g.name == name) {
                Some(g) => g.song_count += 1,
                None => genres.push(Genre {
                    id: genres.len() as u64 + 1,
                    name: name.to_string(),
                    song_count: 1,
                }),
            }
        }
        genres
    }

    fn playlist_songs(&self, playlist: &Playlist) -> Vec<Song> {
        match playlist.kind {
            PlaylistKind::LastAdded => self.last_added(),
            PlaylistKind::RecentlyPlayed | PlaylistKind::TopTracks | PlaylistKind::Stored => {
                Vec::new()
            }
        }
    }

    /// Deletes each song's file and forgets it. A file that is already gone
    /// still counts as removed. Other failures leave the song in place; the
    /// first one is returned only if nothing could be removed.
    fn delete_songs(&mut self, songs: &[Song]) -> Result<usize, StoreError> {
        let mut removed = 0;
        let mut first_err: Option<StoreError> = None;

        for song in songs {
            let Some(pos) = self.entries.iter().position(|e| e.song.id == song.id) else {
                continue;
            };
            let path = &self.entries[pos].song.path;
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to delete file");
                    if first_err.is_none() {
                        first_err = Some(StoreError::Delete {
                            path: path.clone(),
                            source: e,
                        });
                    }
                    continue;
                }
            }
            self.entries.remove(pos);
            removed += 1;
        }

        match first_err {
            Some(e) if removed == 0 => Err(e),
            _ => Ok(removed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.lrc"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_falls_back_to_stem_and_unknown_tags_for_untagged_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("A.lrc"), b"[00:01.00]la").unwrap();

        let store = FsTrackStore::scan(dir.path(), &LibrarySettings::default());
        let songs = store.songs();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "A");
        assert_eq!(songs[0].id, 1);
        assert_eq!(songs[1].title, "b");
        assert_eq!(songs[1].id, 2);
        assert_eq!(songs[0].artist_name, UNKNOWN_TAG);
        assert_eq!(songs[0].artist_id, songs[1].artist_id);
        assert_eq!(songs[0].album_id, songs[1].album_id);

        let artists = store.artists();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name(), "Unknown Artist");
        assert_eq!(artists[0].song_count(), 2);
    }

    #[test]
    fn scan_respects_include_hidden_and_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"x").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            recursive: false,
            ..LibrarySettings::default()
        };
        let store = FsTrackStore::scan(dir.path(), &settings);
        let titles: Vec<String> = store.songs().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["visible".to_string()]);
    }

    #[test]
    fn computed_playlists_resolve_on_demand() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.mp3"), b"x").unwrap();
        fs::write(dir.path().join("two.mp3"), b"x").unwrap();

        let store = FsTrackStore::scan(dir.path(), &LibrarySettings::default());
        let last = store.playlist_songs(&Playlist::synthetic(PlaylistKind::LastAdded));
        assert_eq!(last.len(), 2);
        assert!(last[0].date_added >= last[1].date_added);
        assert!(
            store
                .playlist_songs(&Playlist::synthetic(PlaylistKind::TopTracks))
                .is_empty()
        );
        assert!(store.playlist_songs(&Playlist::stored(7, "Mix")).is_empty());
        assert!(store.genres().is_empty());
    }

    #[test]
    fn delete_songs_removes_files_and_records() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.mp3"), b"x").unwrap();
        fs::write(dir.path().join("drop.mp3"), b"x").unwrap();

        let mut store = FsTrackStore::scan(dir.path(), &LibrarySettings::default());
        let victim = store
            .song_by_path(&dir.path().join("drop.mp3"))
            .cloned()
            .unwrap();

        assert_eq!(store.delete_songs(&[victim.clone()]).unwrap(), 1);
        assert!(!victim.path.exists());
        assert!(dir.path().join("keep.mp3").exists());
        assert_eq!(store.songs().len(), 1);

        // Unknown songs are ignored.
        assert_eq!(store.delete_songs(&[victim]).unwrap(), 0);
    }

    #[test]
    fn song_by_path_matches_non_canonical_paths() {
        let dir = tempdir().unwrap();
        let albums = dir.path().join("albums");
        fs::create_dir_all(&albums).unwrap();
        fs::create_dir_all(dir.path().join("other")).unwrap();
        fs::write(albums.join("a.mp3"), b"x").unwrap();

        let store = FsTrackStore::scan(&albums, &LibrarySettings::default());
        let roundabout = dir.path().join("other").join("..").join("albums").join("a.mp3");
        let song = store.song_by_path(&roundabout).unwrap();
        assert_eq!(song.title, "a");

        assert!(store.song_by_path(&albums.join("missing.mp3")).is_none());
    }
}
