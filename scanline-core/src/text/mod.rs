//! Text rows: character buffers, formatting helpers, pixmap cache
//!
//! The formatter runs on the slow path (at most once per row per frame,
//! right after that row's last visible line) and leaves behind a fully
//! precomputed pixmap so the line renderer never touches the glyph
//! source.

mod overlay;
mod pixmap;
mod row;

pub use overlay::TextOverlay;
pub use pixmap::{RowPixmap, MAX_GLYPH_HEIGHT};
pub use row::{gps_coord, InvertMode, RowBuffer, ROW_FULL};
