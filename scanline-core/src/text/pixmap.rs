//! Precomputed per-row pixel bytes
//!
//! One pixmap holds a full text row's worth of pixel bytes, one byte
//! per character cell per glyph row. It is rebuilt in full whenever the
//! row's character buffer changes and is read straight through by the
//! line renderer, which must never see a rebuild in flight. That
//! exclusion is scheduled, not locked: the rebuild runs right after the
//! row's last visible line, a full frame before the row renders again.

use crate::config::MAX_ROW_CHARS;
use crate::font::GlyphSource;
use crate::text::row::RowBuffer;

/// Tallest glyph the pixmap can hold
pub const MAX_GLYPH_HEIGHT: usize = 16;

/// Pixel byte cache for one text row's full height
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPixmap {
    bytes: [u8; MAX_ROW_CHARS * MAX_GLYPH_HEIGHT],
}

impl RowPixmap {
    /// Blank pixmap, usable as an array initializer
    pub const EMPTY: Self = Self {
        bytes: [0; MAX_ROW_CHARS * MAX_GLYPH_HEIGHT],
    };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Pixel byte for one character cell on one glyph row
    pub fn byte(&self, glyph_line: u8, column: usize) -> u8 {
        self.bytes
            .get(glyph_line as usize * MAX_ROW_CHARS + column)
            .copied()
            .unwrap_or(0)
    }

    /// Rebuild every glyph row from the character buffer.
    ///
    /// Blank columns (NUL or space) yield 0x00. When `apply_inversion`
    /// is set, columns flagged inverted get their ink complemented;
    /// blank columns stay blank either way.
    pub fn rebuild<F: GlyphSource>(&mut self, row: &RowBuffer, font: &F, apply_inversion: bool) {
        let height = (font.height() as usize).min(MAX_GLYPH_HEIGHT);
        for glyph_line in 0..height {
            for column in 0..MAX_ROW_CHARS {
                let value = if row.is_blank_at(column) {
                    0x00
                } else {
                    let mut v = font.row(row.char_at(column), glyph_line as u8);
                    if apply_inversion && row.is_inverted(column) {
                        v = !v;
                    }
                    v
                };
                self.bytes[glyph_line * MAX_ROW_CHARS + column] = value;
            }
        }
    }
}

impl Default for RowPixmap {
    fn default() -> Self {
        Self::new()
    }
}
