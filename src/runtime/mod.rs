use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::library::{FsTrackStore, Playlist, Song, TrackStore};
use crate::logging;
use crate::lyrics::LyricsResolver;

mod command;
mod report;
mod settings;

pub use command::{Command, USAGE, parse};

fn library_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// A song for `file`, taken from `store` when the scan found it.
fn song_for(store: &FsTrackStore, file: &Path) -> Song {
    if let Some(song) = store.song_by_path(file) {
        return song.clone();
    }
    debug!(file = %file.display(), "file not in library, resolving by file name");
    Song {
        title: file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: file.to_path_buf(),
        ..Song::default()
    }
}

/// Entry point for the binary. `Ok(false)` means the command ran but found
/// nothing (no lyrics).
pub fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    logging::init(&settings.logging.level);
    if let Some(problem) = config_problem {
        warn!("{problem}, using defaults");
    }

    let command = parse(env::args().skip(1)).map_err(|e| format!("{e}\n{USAGE}"))?;

    match command {
        Command::Library { dir } => {
            let store = FsTrackStore::scan(&library_dir(dir), &settings.library);
            print!("{}", report::library(&store.artists()));
        }
        Command::Genres { dir } => {
            let store = FsTrackStore::scan(&library_dir(dir), &settings.library);
            print!("{}", report::genres(&store.genres()));
        }
        Command::Playlist { kind, dir } => {
            let store = FsTrackStore::scan(&library_dir(dir), &settings.library);
            let playlist = Playlist::synthetic(kind);
            print!("{}", report::playlist(&playlist, &store.playlist_songs(&playlist)));
        }
        Command::Lyrics { file, dir } => {
            let file = fs::canonicalize(&file).or_else(|_| std::path::absolute(&file))?;
            let dir = match dir {
                Some(d) => std::path::absolute(d)?,
                None => file.parent().map(Path::to_path_buf).unwrap_or_else(|| library_dir(None)),
            };
            let store = FsTrackStore::scan(&dir, &settings.library);
            let song = song_for(&store, &file);

            match LyricsResolver::from_filesystem().resolve(&song) {
                Some(lyrics) => println!("{}", lyrics.trim_end()),
                None => {
                    eprintln!("no lyrics found for {}", file.display());
                    return Ok(false);
                }
            }
        }
    }

    Ok(true)
}
