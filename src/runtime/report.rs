//! Plain-text rendering of library views for the terminal.

use std::fmt::Write;

use crate::format::{format_duration, join_descriptors, section_key, year_string};
use crate::library::{
    Artist, Genre, Playlist, Song, album_info, artist_info, genre_info, playlist_info, song_info,
};

/// Artists bucketed under their section key, each followed by its albums.
pub fn library(artists: &[Artist]) -> String {
    let mut sorted: Vec<&Artist> = artists.iter().collect();
    sorted.sort_by_cached_key(|a| (section_key(a.name()), a.name().to_lowercase()));

    let mut out = String::new();
    let mut current: Option<String> = None;
    for artist in sorted {
        let key = section_key(artist.name());
        if current.as_deref() != Some(key.as_str()) {
            let header = if key.is_empty() { "#" } else { key.as_str() };
            let _ = writeln!(out, "{header}");
            current = Some(key);
        }
        let _ = writeln!(out, "  {}", join_descriptors(artist.name(), &artist_info(artist)));
        for album in &artist.albums {
            let _ = writeln!(
                out,
                "    {} ({})  {}",
                album.title(),
                year_string(album.year()),
                album_info(album)
            );
        }
    }
    out
}

pub fn genres(genres: &[Genre]) -> String {
    let mut out = String::new();
    for genre in genres {
        let _ = writeln!(out, "{}", join_descriptors(&genre.name, &genre_info(genre)));
    }
    out
}

pub fn playlist(playlist: &Playlist, songs: &[Song]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", join_descriptors(&playlist.name, &playlist_info(songs)));
    for song in songs {
        let _ = writeln!(
            out,
            "  {:>3}. {}  {}  [{}]",
            song.track(),
            song.title,
            song_info(song),
            format_duration(song.duration_ms)
        );
    }
    out
}
