use std::path::Path;

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

use crate::error::LookupError;
use crate::library::Song;

use super::source::{DirectoryLister, FsDirectoryLister, LoftyTagReader, TagReader};
use super::sync::is_synchronized;

/// Finds lyrics for a song from its embedded tag and from `.lrc`/`.txt` files
/// next to it.
///
/// Time-tagged lyrics win over plain text from either source. The embedded
/// tag is consulted first; the directory is only searched when the tag is
/// missing, blank or plain. During the search the first synchronized file
/// ends the lookup, and otherwise the last readable plain file is kept.
///
/// Lookup failures never escape `resolve`; each is logged and that source is
/// skipped.
#[derive(Debug, Default, Clone)]
pub struct LyricsResolver<T = LoftyTagReader, D = FsDirectoryLister> {
    tags: T,
    dirs: D,
}

impl LyricsResolver {
    /// Resolver over the real filesystem and `lofty`.
    pub fn from_filesystem() -> Self {
        Self::new(LoftyTagReader, FsDirectoryLister)
    }
}

impl<T: TagReader, D: DirectoryLister> LyricsResolver<T, D> {
    pub fn new(tags: T, dirs: D) -> Self {
        Self { tags, dirs }
    }

    pub fn tag_reader(&self) -> &T {
        &self.tags
    }

    pub fn directory_lister(&self) -> &D {
        &self.dirs
    }

    pub fn resolve(&self, song: &Song) -> Option<String> {
        let embedded = match self.tags.read_lyrics_tag(&song.path) {
            Ok(lyrics) => lyrics,
            Err(e) => {
                debug!(error = %e, "embedded lyrics unavailable");
                None
            }
        };

        let mut fallback = embedded.filter(|l| !l.trim().is_empty());
        if let Some(lyrics) = &fallback
            && is_synchronized(lyrics)
        {
            return fallback;
        }

        let dir = match song.path.parent() {
            Some(p) if p.as_os_str().is_empty() => Path::new("."),
            Some(p) => p,
            None => return fallback,
        };
        if !self.dirs.is_dir(dir) {
            debug!(dir = %dir.display(), "song directory missing, skipping sidecar search");
            return fallback;
        }

        let stem = song
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let patterns: Vec<Regex> = [stem.as_str(), song.title.as_str()]
            .into_iter()
            .filter_map(|needle| match sidecar_pattern(needle) {
                Ok(re) => Some(re),
                Err(e) => {
                    debug!(error = %e, "dropping sidecar pattern");
                    None
                }
            })
            .collect();

        let names = match self.dirs.list_entries(dir) {
            Ok(names) => names,
            Err(e) => {
                debug!(error = %e, "cannot list song directory");
                return fallback;
            }
        };

        for name in names
            .iter()
            .filter(|name| patterns.iter().any(|re| re.is_match(name)))
        {
            trace!(file = %name, "sidecar lyrics candidate");
            let content = match self.dirs.read_file(&dir.join(name)) {
                Ok(content) => content,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable sidecar");
                    continue;
                }
            };
            if content.trim().is_empty() {
                continue;
            }
            if is_synchronized(&content) {
                return Some(content);
            }
            fallback = Some(content);
        }

        fallback
    }
}

/// Case-insensitive match for `*<needle>*.lrc` or `*<needle>*.txt`, with
/// `needle` taken literally.
fn sidecar_pattern(needle: &str) -> Result<Regex, LookupError> {
    let pattern = format!(r"^.*{}.*\.(?:lrc|txt)$", regex::escape(needle));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| LookupError::MalformedMatch { pattern, source })
}
