use crate::format::{
    album_count_string, format_duration, join_descriptors, song_count_string,
};

use super::model::{Album, Artist, Genre, Song, total_duration};

/// "N albums  •  M songs"
pub fn artist_info(artist: &Artist) -> String {
    join_descriptors(
        &album_count_string(artist.album_count()),
        &song_count_string(artist.song_count()),
    )
}

/// Artist name (with `"& "` dropped) followed by the song count.
pub fn album_info(album: &Album) -> String {
    join_descriptors(
        &album.artist_name().replace("& ", ""),
        &song_count_string(album.song_count()),
    )
}

/// "Artist  •  Album", or whichever half is present.
pub fn song_info(song: &Song) -> String {
    join_descriptors(&song.artist_name, &song.album_name)
}

pub fn genre_info(genre: &Genre) -> String {
    song_count_string(genre.song_count)
}

/// Song count and total running time of a list of songs.
pub fn playlist_info(songs: &[Song]) -> String {
    join_descriptors(
        &song_count_string(songs.len()),
        &format_duration(total_duration(songs)),
    )
}
