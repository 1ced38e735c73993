use std::path::PathBuf;

use crate::library::PlaylistKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Artists grouped under section headers.
    Library { dir: Option<PathBuf> },
    Genres { dir: Option<PathBuf> },
    Playlist {
        kind: PlaylistKind,
        dir: Option<PathBuf>,
    },
    /// Lyrics for one audio file; `dir` is the library to look it up in.
    Lyrics { file: PathBuf, dir: Option<PathBuf> },
}

pub const USAGE: &str = "\
usage: sostenuto [DIR]
       sostenuto genres [DIR]
       sostenuto playlist <last-added|recently-played|top-tracks> [DIR]
       sostenuto lyrics <FILE> [DIR]";

fn playlist_kind(name: &str) -> Option<PlaylistKind> {
    match name {
        "last-added" | "last_added" => Some(PlaylistKind::LastAdded),
        "recently-played" | "recently_played" => Some(PlaylistKind::RecentlyPlayed),
        "top-tracks" | "top_tracks" => Some(PlaylistKind::TopTracks),
        _ => None,
    }
}

/// Parse arguments, excluding the program name.
pub fn parse<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let first = args.next();
    let second = args.next().map(PathBuf::from);
    let third = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return Err("too many arguments".to_string());
    }

    match first.as_deref() {
        None => Ok(Command::Library { dir: None }),
        Some("genres") if third.is_none() => Ok(Command::Genres { dir: second }),
        Some("playlist") => {
            let name = second.ok_or("playlist needs a name")?;
            let kind = name
                .to_str()
                .and_then(playlist_kind)
                .ok_or_else(|| format!("unknown playlist `{}`", name.display()))?;
            Ok(Command::Playlist { kind, dir: third })
        }
        Some("lyrics") => {
            let file = second.ok_or("lyrics needs a file")?;
            Ok(Command::Lyrics { file, dir: third })
        }
        Some(dir) if second.is_none() => Ok(Command::Library {
            dir: Some(PathBuf::from(dir)),
        }),
        Some(_) => Err("unexpected arguments".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_and_directory_list_the_library() {
        assert_eq!(parse(args(&[])), Ok(Command::Library { dir: None }));
        assert_eq!(
            parse(args(&["/music"])),
            Ok(Command::Library {
                dir: Some(PathBuf::from("/music"))
            })
        );
    }

    #[test]
    fn subcommands() {
        assert_eq!(
            parse(args(&["lyrics", "/music/a.mp3"])),
            Ok(Command::Lyrics {
                file: PathBuf::from("/music/a.mp3"),
                dir: None
            })
        );
        assert_eq!(
            parse(args(&["playlist", "top-tracks", "/music"])),
            Ok(Command::Playlist {
                kind: PlaylistKind::TopTracks,
                dir: Some(PathBuf::from("/music"))
            })
        );
        assert_eq!(parse(args(&["genres"])), Ok(Command::Genres { dir: None }));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(args(&["lyrics"])).is_err());
        assert!(parse(args(&["playlist", "favourites"])).is_err());
        assert!(parse(args(&["a", "b"])).is_err());
        assert!(parse(args(&["lyrics", "a", "b", "c"])).is_err());
    }
}
