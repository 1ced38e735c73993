//! Lyrics lookup: embedded tags first, then `.lrc`/`.txt` files beside the song.

mod resolve;
mod source;
mod sync;

pub use resolve::LyricsResolver;
pub use source::{DirectoryLister, FsDirectoryLister, LoftyTagReader, TagReader};
pub use sync::is_synchronized;
