//! Fixed-width row character buffer and formatting helpers
//!
//! Every helper takes a column position and returns the next free
//! column, or [`ROW_FULL`] once the row cannot take more content.
//! Passing [`ROW_FULL`] back in is a no-op, so a formatting sequence can
//! chain helpers without checking each result: once the row fills up,
//! the rest of the sequence is silently skipped. Nothing ever writes
//! past the buffer.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_ROW_CHARS;
use crate::feeds::{AnalogReading, ClockTime};

/// Sentinel position: the row has no room for further content
pub const ROW_FULL: usize = MAX_ROW_CHARS;

/// Bytes in the packed inverted-video bitset
const INVERT_BYTES: usize = (MAX_ROW_CHARS + 7) / 8;

/// Scratch capacity for numeric formatting ("-2147483648" is 11 chars)
const SCRATCH: usize = 16;

/// Per-character inverted-video operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvertMode {
    Off,
    On,
    Flip,
}

/// One display row's character codes plus inverted-video flags
///
/// Written only by the row formatter; read only by the pixmap rebuild
/// and (for the blank-column check) the line renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBuffer {
    chars: [u8; MAX_ROW_CHARS],
    inverted: [u8; INVERT_BYTES],
}

impl RowBuffer {
    /// Cleared row, usable as an array initializer
    pub const EMPTY: Self = Self {
        chars: [0; MAX_ROW_CHARS],
        inverted: [0; INVERT_BYTES],
    };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Clear all characters and inversion flags
    pub fn clear(&mut self) {
        self.chars = [0; MAX_ROW_CHARS];
        self.inverted = [0; INVERT_BYTES];
    }

    /// Character code at a column (0 past the end)
    pub fn char_at(&self, pos: usize) -> u8 {
        self.chars.get(pos).copied().unwrap_or(0)
    }

    /// A column renders blank if it holds NUL or a space
    pub fn is_blank_at(&self, pos: usize) -> bool {
        matches!(self.char_at(pos), 0 | b' ')
    }

    /// Set, clear or toggle a column's inverted-video flag
    pub fn set_inverted(&mut self, pos: usize, mode: InvertMode) {
        if pos >= MAX_ROW_CHARS {
            return;
        }
        let mask = 1u8 << (pos % 8);
        let byte = &mut self.inverted[pos / 8];
        match mode {
            InvertMode::Off => *byte &= !mask,
            InvertMode::On => *byte |= mask,
            InvertMode::Flip => *byte ^= mask,
        }
    }

    /// Inverted-video flag for a column
    pub fn is_inverted(&self, pos: usize) -> bool {
        if pos >= MAX_ROW_CHARS {
            return false;
        }
        self.inverted[pos / 8] & (1 << (pos % 8)) != 0
    }

    /// Write a string, clipping whatever does not fit.
    ///
    /// Returns the column after the written text, or [`ROW_FULL`] if the
    /// clip point was reached.
    pub fn put_str(&mut self, pos: usize, s: &str) -> usize {
        if pos >= ROW_FULL {
            return ROW_FULL;
        }
        let avail = MAX_ROW_CHARS - pos;
        let take = s.len().min(avail);
        self.chars[pos..pos + take].copy_from_slice(&s.as_bytes()[..take]);
        if take < s.len() {
            ROW_FULL
        } else {
            pos + take
        }
    }

    /// Write a string only if the whole thing fits; otherwise return
    /// [`ROW_FULL`] and leave the buffer untouched.
    fn put_all(&mut self, pos: usize, s: &str) -> usize {
        if pos >= ROW_FULL || pos + s.len() > MAX_ROW_CHARS {
            return ROW_FULL;
        }
        self.put_str(pos, s)
    }

    /// Write a decimal number; all-or-nothing
    pub fn put_number(&mut self, pos: usize, number: i32) -> usize {
        let mut scratch: String<SCRATCH> = String::new();
        let _ = write!(scratch, "{}", number);
        self.put_all(pos, &scratch)
    }

    /// Write a number immediately followed by a unit suffix
    pub fn put_number_with_unit(&mut self, pos: usize, number: i32, unit: &str) -> usize {
        let pos = self.put_number(pos, number);
        self.put_all(pos, unit)
    }

    /// Write "HH:MM:SS", zero padded; all-or-nothing
    pub fn put_time(&mut self, pos: usize, clock: &ClockTime) -> usize {
        let mut scratch: String<SCRATCH> = String::new();
        let _ = write!(
            scratch,
            "{:02}:{:02}:{:02}",
            clock.hour, clock.min, clock.sec
        );
        self.put_all(pos, &scratch)
    }

    /// Write a voltage as "V.CC" with a "V" suffix (e.g. "11.80V")
    pub fn put_adc_volts(&mut self, pos: usize, reading: &AnalogReading) -> usize {
        let mut scratch: String<SCRATCH> = String::new();
        let _ = write!(
            scratch,
            "{}.{:02}V",
            reading.volts_whole(),
            reading.volts_frac()
        );
        self.put_all(pos, &scratch)
    }

    /// Write a percentage with its "%" suffix
    pub fn put_percent(&mut self, pos: usize, percent: u8) -> usize {
        self.put_number_with_unit(pos, percent as i32, "%")
    }

    /// Write a packed coordinate as "D:MM.DDDDH" with hemisphere suffix.
    /// A zero coordinate means "no data" and renders the placeholder.
    pub fn put_gps_coord(&mut self, pos: usize, value: i32, is_lat: bool) -> usize {
        let s = gps_coord(value, is_lat);
        self.put_all(pos, &s)
    }
}

impl Default for RowBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a packed degree-minute coordinate to text.
///
/// Exposed separately so callers can right-align the result. Zero is
/// the feed's "no data yet" value and yields the literal placeholder.
pub fn gps_coord(value: i32, is_lat: bool) -> String<16> {
    let mut s: String<16> = String::new();
    if value == 0 {
        let _ = s.push_str("--:--.----?");
        return s;
    }

    let magnitude = value.unsigned_abs();
    let degrees = magnitude / 1_000_000;
    let minutes = (magnitude / 10_000) % 100;
    let decimals = magnitude % 10_000;

    let hemisphere = match (is_lat, value > 0) {
        (true, true) => 'N',
        (true, false) => 'S',
        (false, true) => 'E',
        (false, false) => 'W',
    };

    let _ = write!(s, "{}:{:02}.{:04}{}", degrees, minutes, decimals, hemisphere);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_and_advance() {
        let mut row = RowBuffer::new();
        let pos = row.put_str(0, "HELLO");
        assert_eq!(pos, 5);
        assert_eq!(&row.chars[..5], b"HELLO");
    }

    #[test]
    fn test_put_str_clips_at_capacity() {
        let mut row = RowBuffer::new();
        let pos = row.put_str(MAX_ROW_CHARS - 2, "WIDE");
        assert_eq!(pos, ROW_FULL);
        assert_eq!(row.char_at(MAX_ROW_CHARS - 2), b'W');
        assert_eq!(row.char_at(MAX_ROW_CHARS - 1), b'I');
    }

    #[test]
    fn test_put_number_exact_fit() {
        let mut row = RowBuffer::new();
        let pos = row.put_number(MAX_ROW_CHARS - 3, 123);
        assert_eq!(pos, MAX_ROW_CHARS);
        assert_eq!(row.char_at(MAX_ROW_CHARS - 1), b'3');
    }

    #[test]
    fn test_put_number_overflow_leaves_buffer_untouched() {
        let mut row = RowBuffer::new();
        row.put_str(0, "X");
        let before = row.clone();
        let pos = row.put_number(MAX_ROW_CHARS - 2, 12345);
        assert_eq!(pos, ROW_FULL);
        assert_eq!(row, before);
    }

    #[test]
    fn test_sentinel_position_is_noop() {
        let mut row = RowBuffer::new();
        let before = row.clone();
        assert_eq!(row.put_str(ROW_FULL, "X"), ROW_FULL);
        assert_eq!(row.put_number(ROW_FULL, 7), ROW_FULL);
        assert_eq!(row.put_percent(ROW_FULL, 50), ROW_FULL);
        assert_eq!(row, before);
    }

    #[test]
    fn test_put_negative_number() {
        let mut row = RowBuffer::new();
        let pos = row.put_number(0, -42);
        assert_eq!(pos, 3);
        assert_eq!(&row.chars[..3], b"-42");
    }

    #[test]
    fn test_put_number_with_unit() {
        let mut row = RowBuffer::new();
        let pos = row.put_number_with_unit(0, 270, "DEG");
        assert_eq!(pos, 6);
        assert_eq!(&row.chars[..6], b"270DEG");
    }

    #[test]
    fn test_put_time_zero_padded() {
        let mut row = RowBuffer::new();
        let clock = ClockTime {
            hour: 7,
            min: 5,
            sec: 9,
        };
        let pos = row.put_time(0, &clock);
        assert_eq!(pos, 8);
        assert_eq!(&row.chars[..8], b"07:05:09");
    }

    #[test]
    fn test_put_adc_volts() {
        let mut row = RowBuffer::new();
        let reading = AnalogReading { volts_x100: 1180 };
        let pos = row.put_adc_volts(0, &reading);
        assert_eq!(pos, 6);
        assert_eq!(&row.chars[..6], b"11.80V");
    }

    #[test]
    fn test_gps_coord_placeholder_for_zero() {
        assert_eq!(gps_coord(0, true).as_str(), "--:--.----?");
        assert_eq!(gps_coord(0, false).as_str(), "--:--.----?");
    }

    #[test]
    fn test_gps_coord_hemispheres() {
        assert_eq!(gps_coord(59_195_000, true).as_str(), "59:19.5000N");
        assert_eq!(gps_coord(-59_195_000, true).as_str(), "59:19.5000S");
        assert_eq!(gps_coord(18_041_234, false).as_str(), "18:04.1234E");
        assert_eq!(gps_coord(-18_041_234, false).as_str(), "18:04.1234W");
    }

    #[test]
    fn test_inverted_flags() {
        let mut row = RowBuffer::new();
        row.set_inverted(3, InvertMode::On);
        assert!(row.is_inverted(3));
        row.set_inverted(3, InvertMode::Flip);
        assert!(!row.is_inverted(3));
        row.set_inverted(3, InvertMode::Flip);
        assert!(row.is_inverted(3));
        row.set_inverted(3, InvertMode::Off);
        assert!(!row.is_inverted(3));
        // Out of range is ignored, not a panic
        row.set_inverted(MAX_ROW_CHARS, InvertMode::On);
        assert!(!row.is_inverted(MAX_ROW_CHARS));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut row = RowBuffer::new();
        row.put_str(0, "ABC");
        row.set_inverted(1, InvertMode::On);
        row.clear();
        assert_eq!(row, RowBuffer::new());
    }
}
