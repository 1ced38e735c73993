use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use lofty::prelude::*;
use lofty::tag::ItemKey;
use tracing::debug;

use crate::error::LookupError;

/// Reads the lyrics tag embedded in an audio file.
pub trait TagReader {
    /// `Ok(None)` when the file has tags but no lyrics.
    fn read_lyrics_tag(&self, path: &Path) -> Result<Option<String>, LookupError>;
}

/// Filesystem access needed by the sidecar-file search.
pub trait DirectoryLister {
    fn is_dir(&self, path: &Path) -> bool;

    /// File names in `dir`, in no particular order.
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, LookupError>;

    fn read_file(&self, path: &Path) -> Result<String, LookupError>;
}

/// `TagReader` over `lofty`: primary tag first, then whichever tag comes first.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_lyrics_tag(&self, path: &Path) -> Result<Option<String>, LookupError> {
        let tagged = lofty::read_from_path(path).map_err(|e| LookupError::MetadataUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Err(LookupError::MetadataUnavailable {
                path: path.to_path_buf(),
                reason: "file carries no tags".to_string(),
            });
        };

        Ok(tag.get_string(&ItemKey::Lyrics).map(str::to_string))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, LookupError> {
        let entries = fs::read_dir(dir).map_err(|e| LookupError::io(dir, e))?;
        Ok(entry_names(dir, entries.map(|e| e.map(|e| e.file_name()))))
    }

    fn read_file(&self, path: &Path) -> Result<String, LookupError> {
        let bytes = fs::read(path).map_err(|e| LookupError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// UTF-8 names from a directory iterator. An entry that fails to read is
/// logged and skipped rather than failing the whole listing.
fn entry_names(dir: &Path, entries: impl Iterator<Item = io::Result<OsString>>) -> Vec<String> {
    let mut names = Vec::new();
    for entry in entries {
        let name = match entry {
            Ok(name) => name,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        // Names that aren't valid UTF-8 can't match a text pattern anyway.
        if let Ok(name) = name.into_string() {
            names.push(name);
        }
    }
    names
}
