//! Glyph lookup
//!
//! The glyph source is queried once per pixmap rebuild, never on the
//! line-sync path. Rows are one byte each, MSB = leftmost pixel; glyphs
//! are 6 pixels wide, so the two low bits of every row are zero and
//! become the inter-character gap.

mod glyphs;

/// Read-only character-to-bitmap lookup
pub trait GlyphSource {
    /// Glyph height in rows
    fn height(&self) -> u8;

    /// One bitmap row of one character. Characters or rows outside the
    /// table yield 0x00 (rendered blank, never an error).
    fn row(&self, ch: u8, row: u8) -> u8;
}

/// Built-in 6x8 font covering printable ASCII (0x20..=0x7F)
#[derive(Debug, Clone, Copy, Default)]
pub struct Font6x8;

impl Font6x8 {
    /// First character present in the table
    pub const FIRST_CHAR: u8 = 0x20;

    /// Glyph height in rows
    pub const HEIGHT: u8 = 8;
}

impl GlyphSource for Font6x8 {
    fn height(&self) -> u8 {
        Self::HEIGHT
    }

    fn row(&self, ch: u8, row: u8) -> u8 {
        if ch < Self::FIRST_CHAR || row >= Self::HEIGHT {
            return 0x00;
        }
        let index = (ch - Self::FIRST_CHAR) as usize;
        match glyphs::GLYPHS.get(index) {
            Some(glyph) => glyph[row as usize],
            None => 0x00,
        }
    }
}
