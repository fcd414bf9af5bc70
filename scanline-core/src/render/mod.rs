//! Per-line renderers
//!
//! Called from the sync handler for the line in progress, inside the
//! line's timing window. Both renderers only stream precomputed bytes;
//! all content decisions were made earlier, on the slow path.

use crate::text::{RowBuffer, RowPixmap};
use crate::traits::{GraphicsSource, PixelSink};

/// Stream one glyph row of a text row.
///
/// Per column: the active line is asserted only when the source
/// character is non-blank, which blanks unused trailing columns without
/// costing a branch on the byte itself. A final zero byte with the
/// active line deasserted terminates the line cleanly, so no overlay
/// ink can smear into the following scan line.
pub fn draw_text_line<S: PixelSink>(
    sink: &mut S,
    row: &RowBuffer,
    pixmap: &RowPixmap,
    glyph_line: u8,
    columns: u8,
) {
    for column in 0..columns as usize {
        sink.set_active(!row.is_blank_at(column));
        sink.write(pixmap.byte(glyph_line, column));
    }
    sink.write(0x00);
    sink.set_active(false);
}

/// Stream one line of the graphics region, zero-terminated like text
pub fn draw_graphics_line<S: PixelSink, G: GraphicsSource>(
    sink: &mut S,
    source: &G,
    region_line: u16,
) {
    sink.set_active(true);
    for &byte in source.line(region_line) {
        sink.write(byte);
    }
    sink.write(0x00);
    sink.set_active(false);
}
