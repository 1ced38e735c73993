//! Library model and the stores that populate it.
//!
//! `model` holds the song/album/artist projections, `display` turns them into
//! info strings, and `store`/`scan` provide the records.

mod display;
mod model;
mod scan;
mod store;

pub use display::*;
pub use model::*;
pub use scan::{FsTrackStore, UNKNOWN_TAG};
pub use store::TrackStore;
