//! Row formatter
//!
//! Assembles the fixed per-row overlay content from feed snapshots and
//! keeps each row's pixmap cache fresh. Runs at most once per row per
//! frame, driven by the scheduler's RowDone signal; never on the sync
//! path.

use crate::config::{OsdConfig, MAX_TEXT_ROWS};
use crate::feeds::FeedSnapshot;
use crate::font::GlyphSource;
use crate::text::pixmap::RowPixmap;
use crate::text::row::{gps_coord, RowBuffer};

/// RSSI channel calibration, centivolts at 0% and 100%
const RSSI_FLOOR_X100: u16 = 90;
const RSSI_CEIL_X100: u16 = 310;

const LENGTH_UNIT: &str = "M";
const SPEED_UNIT: &str = "KPH";

/// All text rows' character buffers and pixmap caches
///
/// Content layout is fixed per row index:
/// - row 0: clock, main battery voltage, extra channel, RSSI level
/// - row 1: distance/bearing to home, home-set marker
/// - row 2: latitude (left), longitude (right-aligned)
/// - row 3: altitude above home, speed, heading, sat count, fix state
/// - further rows: placeholder tag
///
/// Rows 1-3 need the position feed; with the `gps` capability off they
/// render blank.
pub struct TextOverlay {
    buffers: [RowBuffer; MAX_TEXT_ROWS],
    pixmaps: [RowPixmap; MAX_TEXT_ROWS],
    row_count: u8,
    row_chars: u8,
    inverted_text: bool,
    gps: bool,
    analog_channels: u8,
}

impl TextOverlay {
    pub fn new(cfg: &OsdConfig) -> Self {
        Self {
            buffers: [RowBuffer::EMPTY; MAX_TEXT_ROWS],
            pixmaps: [RowPixmap::EMPTY; MAX_TEXT_ROWS],
            row_count: cfg.row_triggers.len() as u8,
            row_chars: cfg.row_chars,
            inverted_text: cfg.inverted_text,
            gps: cfg.gps,
            analog_channels: cfg.analog_channels,
        }
    }

    /// Configured number of rows
    pub fn row_count(&self) -> u8 {
        self.row_count
    }

    /// Columns rendered per row
    pub fn row_chars(&self) -> u8 {
        self.row_chars
    }

    /// Character buffer of one row (blank buffer for bad indexes)
    pub fn row(&self, row: u8) -> &RowBuffer {
        static BLANK: RowBuffer = RowBuffer::EMPTY;
        self.buffers.get(row as usize).unwrap_or(&BLANK)
    }

    /// Pixmap cache of one row (blank pixmap for bad indexes)
    pub fn pixmap(&self, row: u8) -> &RowPixmap {
        static BLANK: RowPixmap = RowPixmap::EMPTY;
        self.pixmaps.get(row as usize).unwrap_or(&BLANK)
    }

    /// Reformat one row's characters from a feed snapshot.
    ///
    /// Deterministic: the same snapshot always produces the same buffer.
    pub fn format_row(&mut self, row: u8, feeds: &FeedSnapshot) {
        if row >= self.row_count {
            return;
        }
        let gps = self.gps;
        let channels = self.analog_channels;
        let width = self.row_chars as usize;
        let buf = &mut self.buffers[row as usize];
        buf.clear();

        match row {
            0 => {
                let mut pos = buf.put_time(0, &feeds.clock);
                if let Some(main) = feeds.analog.first() {
                    pos = buf.put_adc_volts(pos + 1, main);
                }
                if channels >= 3 {
                    if let Some(aux) = feeds.analog.get(1) {
                        pos = buf.put_adc_volts(pos + 1, aux);
                    }
                }
                let rssi_channel = (channels - 1) as usize;
                if let Some(rssi) = feeds.analog.get(rssi_channel) {
                    buf.put_percent(pos + 1, rssi.level_percent(RSSI_FLOOR_X100, RSSI_CEIL_X100));
                }
            }
            1 if gps => {
                let mut pos =
                    buf.put_number_with_unit(0, feeds.home.distance_m as i32, LENGTH_UNIT);
                pos = buf.put_number_with_unit(pos + 1, feeds.home.bearing_deg as i32, "DEG");
                if feeds.home.is_set {
                    buf.put_str(pos + 1, "H-SET");
                }
            }
            2 if gps => {
                buf.put_gps_coord(0, feeds.gps.latitude, true);
                let lon = gps_coord(feeds.gps.longitude, false);
                let start = width.saturating_sub(lon.len());
                buf.put_str(start, &lon);
            }
            3 if gps => {
                let rel_alt = feeds.gps.altitude_m - feeds.home.altitude_m;
                let mut pos = buf.put_number_with_unit(0, rel_alt, LENGTH_UNIT);
                pos = buf.put_number_with_unit(pos + 1, feeds.gps.speed, SPEED_UNIT);
                pos = buf.put_number_with_unit(pos + 1, feeds.gps.heading_deg as i32, "DEG");
                pos = buf.put_number_with_unit(pos + 1, feeds.gps.sats as i32, "S");
                buf.put_str(pos + 1, if feeds.gps.has_fix { "FIX" } else { "BAD" });
            }
            1..=3 => {} // position feed disabled: row stays blank
            _ => {
                let pos = buf.put_str(0, "T:");
                buf.put_number(pos, row as i32 + 1);
            }
        }
    }

    /// Rebuild one row's pixmap from its character buffer
    pub fn rebuild_pixmap<F: GlyphSource>(&mut self, row: u8, font: &F) {
        if row >= self.row_count {
            return;
        }
        let buf = &self.buffers[row as usize];
        self.pixmaps[row as usize].rebuild(buf, font, self.inverted_text);
    }

    /// Reformat and rebuild one row in one go
    pub fn refresh_row<F: GlyphSource>(&mut self, row: u8, feeds: &FeedSnapshot, font: &F) {
        self.format_row(row, feeds);
        self.rebuild_pixmap(row, font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OsdConfig;
    use crate::feeds::{AnalogReading, ClockTime, GpsFix, HomePoint};
    use crate::font::Font6x8;

    fn snapshot() -> FeedSnapshot {
        let mut feeds = FeedSnapshot {
            clock: ClockTime {
                hour: 7,
                min: 5,
                sec: 9,
            },
            gps: GpsFix {
                latitude: 59_195_000,
                longitude: 18_041_234,
                altitude_m: 150,
                speed: 42,
                heading_deg: 270,
                sats: 9,
                has_fix: true,
                ..Default::default()
            },
            home: HomePoint {
                distance_m: 820,
                bearing_deg: 115,
                is_set: true,
                altitude_m: 30,
            },
            ..Default::default()
        };
        feeds.analog.push(AnalogReading { volts_x100: 1180 }).unwrap();
        feeds.analog.push(AnalogReading { volts_x100: 200 }).unwrap();
        feeds
    }

    fn row_text(overlay: &TextOverlay, row: u8) -> heapless::String<32> {
        let mut s = heapless::String::new();
        for pos in 0..overlay.row_chars() as usize {
            let ch = overlay.row(row).char_at(pos);
            let _ = s.push(if ch == 0 { ' ' } else { ch as char });
        }
        s
    }

    #[test]
    fn test_row0_clock_and_levels() {
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        overlay.format_row(0, &snapshot());
        let text = row_text(&overlay, 0);
        assert!(text.starts_with("07:05:09 11.80V 50%"), "{}", text);
    }

    #[test]
    fn test_row1_home_reference() {
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        overlay.format_row(1, &snapshot());
        let text = row_text(&overlay, 1);
        assert!(text.starts_with("820M 115DEG H-SET"), "{}", text);
    }

    #[test]
    fn test_row2_coordinates_aligned() {
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        overlay.format_row(2, &snapshot());
        let text = row_text(&overlay, 2);
        assert!(text.starts_with("59:19.5000N"), "{}", text);
        assert!(text.ends_with("18:04.1234E"), "{}", text);
    }

    #[test]
    fn test_row2_placeholder_without_data() {
        let mut feeds = snapshot();
        feeds.gps.latitude = 0;
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        overlay.format_row(2, &feeds);
        let text = row_text(&overlay, 2);
        assert!(text.starts_with("--:--.----?"), "{}", text);
    }

    #[test]
    fn test_row3_flight_data() {
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        overlay.format_row(3, &snapshot());
        let text = row_text(&overlay, 3);
        assert!(text.starts_with("120M 42KPH 270DEG 9S FIX"), "{}", text);
    }

    #[test]
    fn test_gps_rows_blank_when_disabled() {
        let mut cfg = OsdConfig::default();
        cfg.gps = false;
        let mut overlay = TextOverlay::new(&cfg);
        for row in 1..=3 {
            overlay.format_row(row, &snapshot());
            assert_eq!(overlay.row(row), &RowBuffer::EMPTY);
        }
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let feeds = snapshot();
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        let font = Font6x8;
        for row in 0..overlay.row_count() {
            overlay.refresh_row(row, &feeds, &font);
        }
        let first: heapless::Vec<_, 8> = (0..overlay.row_count())
            .map(|r| (overlay.row(r).clone(), overlay.pixmap(r).clone()))
            .collect();

        for row in 0..overlay.row_count() {
            overlay.refresh_row(row, &feeds, &font);
        }
        for (r, (buf, pix)) in first.iter().enumerate() {
            assert_eq!(overlay.row(r as u8), buf);
            assert_eq!(overlay.pixmap(r as u8), pix);
        }
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut overlay = TextOverlay::new(&OsdConfig::default());
        overlay.format_row(7, &snapshot());
        assert_eq!(overlay.row(7), &RowBuffer::EMPTY);
    }
}
