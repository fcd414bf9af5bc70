//! Configuration type definitions
//!
//! One explicit struct replaces the build-time flag soup a typical OSD
//! firmware carries. Everything here is resolved once at startup and
//! treated as read-only by the sync-triggered path. A disabled
//! capability (graphics, GPS rows, inverted text) renders as absent,
//! never as an error.

use heapless::Vec;

/// Maximum configurable text rows
pub const MAX_TEXT_ROWS: usize = 8;

/// Character-cell columns per row (also the pixmap stride)
pub const MAX_ROW_CHARS: usize = 30;

/// Maximum analog input channels
pub const MAX_ANALOG_CHANNELS: usize = 3;

/// Video timing presets for the supported analog standards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VideoStandard {
    /// 312 lines per field, 50 fields/s
    Pal,
    /// 262 lines per field, 60 fields/s
    Ntsc,
}

impl VideoStandard {
    /// Line counter value at which the frame ends
    pub const fn last_line(self) -> u16 {
        match self {
            VideoStandard::Pal => 312,
            VideoStandard::Ntsc => 262,
        }
    }

    /// Line counter threshold above which a V-sync edge is accepted as a
    /// frame boundary. V-sync seen below this is an equalizing pulse and
    /// is ignored.
    pub const fn vsync_reset_line(self) -> u16 {
        match self {
            VideoStandard::Pal => 200,
            VideoStandard::Ntsc => 170,
        }
    }

    /// Field rate in Hz (used for the soft clock cadence)
    pub const fn fields_per_second(self) -> u8 {
        match self {
            VideoStandard::Pal => 50,
            VideoStandard::Ntsc => 60,
        }
    }
}

/// Graphics overlay region placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GraphicsConfig {
    /// First video line of the region
    pub start_line: u16,
    /// Region height in video lines
    pub height: u16,
    /// Bytes streamed per region line
    pub width_bytes: u8,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Trigger table is empty
    NoRows,
    /// Trigger table is not strictly increasing
    TriggerOrder,
    /// Row at this index overlaps the next row's trigger line
    RowOverlap(u8),
    /// Row at this index extends past the last line of the frame
    RowPastFrame(u8),
    /// Character height or size multiplier is zero
    ZeroScale,
    /// Row width exceeds the pixmap stride
    RowTooWide,
    /// Analog channel count outside the supported 2..=3 range
    AnalogChannels,
}

/// Full OSD configuration
///
/// `row_triggers` is the row trigger table: the video line at which each
/// text row starts, strictly increasing, one entry per row.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OsdConfig {
    /// Trigger line per text row
    pub row_triggers: Vec<u16, MAX_TEXT_ROWS>,
    /// Character cells rendered per row
    pub row_chars: u8,
    /// Glyph height in pixmap rows
    pub char_height: u8,
    /// Vertical scaling: video lines per glyph row
    pub size_mult: u8,
    /// Halve the pixel clock and drop the extra inter-byte pads
    pub small_text: bool,
    /// Honor per-character inverted-video flags
    pub inverted_text: bool,
    /// Graphics overlay region, if any
    pub graphics: Option<GraphicsConfig>,
    /// Render the position-feed rows
    pub gps: bool,
    /// Number of analog input channels (2 or 3)
    pub analog_channels: u8,
    /// Line counter value marking the frame boundary
    pub last_line: u16,
    /// Counter threshold for accepting a V-sync as a frame reset
    pub vsync_reset_line: u16,
}

impl OsdConfig {
    /// Default layout for a video standard: five text rows in the top
    /// half of the frame, graphics region below them.
    pub fn preset(standard: VideoStandard) -> Self {
        let mut row_triggers = Vec::new();
        for trigger in [30u16, 60, 90, 120, 150] {
            // Cannot fail: 5 < MAX_TEXT_ROWS
            let _ = row_triggers.push(trigger);
        }
        Self {
            row_triggers,
            row_chars: MAX_ROW_CHARS as u8,
            char_height: 8,
            size_mult: 1,
            small_text: false,
            inverted_text: false,
            graphics: Some(GraphicsConfig {
                start_line: 170,
                height: 16,
                width_bytes: 8,
            }),
            gps: true,
            analog_channels: 2,
            last_line: standard.last_line(),
            vsync_reset_line: standard.vsync_reset_line(),
        }
    }

    /// Video lines spanned by one text row
    pub fn row_height(&self) -> u16 {
        self.char_height as u16 * self.size_mult as u16
    }

    /// Check the invariants the scheduler relies on.
    ///
    /// Must pass before the sync loop starts; the hot path does no
    /// bounds re-checking of its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_triggers.is_empty() {
            return Err(ConfigError::NoRows);
        }
        if self.char_height == 0 || self.size_mult == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if self.row_chars as usize > MAX_ROW_CHARS {
            return Err(ConfigError::RowTooWide);
        }
        if !(2..=MAX_ANALOG_CHANNELS as u8).contains(&self.analog_channels) {
            return Err(ConfigError::AnalogChannels);
        }

        // Span arithmetic in u32: a trigger near u16::MAX must come out
        // as a rejection, not an overflow.
        let height = self.row_height() as u32;
        for (i, pair) in self.row_triggers.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::TriggerOrder);
            }
            if pair[0] as u32 + height > pair[1] as u32 {
                return Err(ConfigError::RowOverlap(i as u8));
            }
        }

        // The last row's span (plus the line that fires RowDone) must
        // stay inside the frame.
        let last_index = self.row_triggers.len() - 1;
        let last_trigger = self.row_triggers[last_index];
        if last_trigger as u32 + height >= self.last_line as u32 {
            return Err(ConfigError::RowPastFrame(last_index as u8));
        }

        Ok(())
    }
}

impl Default for OsdConfig {
    fn default() -> Self {
        Self::preset(VideoStandard::Pal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_triggers(triggers: &[u16]) -> OsdConfig {
        let mut cfg = OsdConfig::default();
        cfg.row_triggers.clear();
        for &t in triggers {
            cfg.row_triggers.push(t).unwrap();
        }
        cfg
    }

    #[test]
    fn test_presets_validate() {
        assert_eq!(OsdConfig::preset(VideoStandard::Pal).validate(), Ok(()));
        assert_eq!(OsdConfig::preset(VideoStandard::Ntsc).validate(), Ok(()));
    }

    #[test]
    fn test_empty_trigger_table_rejected() {
        let cfg = config_with_triggers(&[]);
        assert_eq!(cfg.validate(), Err(ConfigError::NoRows));
    }

    #[test]
    fn test_unordered_triggers_rejected() {
        let cfg = config_with_triggers(&[30, 20, 90]);
        assert_eq!(cfg.validate(), Err(ConfigError::TriggerOrder));
    }

    #[test]
    fn test_overlapping_rows_rejected() {
        // Height 8: row at 30 spans 30..38, next trigger at 35 overlaps
        let cfg = config_with_triggers(&[30, 35]);
        assert_eq!(cfg.validate(), Err(ConfigError::RowOverlap(0)));
    }

    #[test]
    fn test_adjacent_rows_allowed() {
        // trigger[i] + height == trigger[i+1] is the tightest legal packing
        let cfg = config_with_triggers(&[30, 38, 46]);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_row_past_frame_rejected() {
        let mut cfg = config_with_triggers(&[30, 310]);
        cfg.last_line = 312;
        assert_eq!(cfg.validate(), Err(ConfigError::RowPastFrame(1)));
    }

    #[test]
    fn test_trigger_near_u16_max_rejected() {
        // The span check must not wrap at the u16 boundary and accept
        // a row that sits past the frame.
        let cfg = config_with_triggers(&[65_530]);
        assert_eq!(cfg.validate(), Err(ConfigError::RowPastFrame(0)));

        let cfg = config_with_triggers(&[65_530, 65_531]);
        assert_eq!(cfg.validate(), Err(ConfigError::RowOverlap(0)));
    }

    #[test]
    fn test_scaled_row_height() {
        let mut cfg = OsdConfig::default();
        cfg.char_height = 8;
        cfg.size_mult = 2;
        assert_eq!(cfg.row_height(), 16);

        // Scaling can introduce overlap where unscaled rows fit
        let mut cfg = config_with_triggers(&[30, 40]);
        cfg.size_mult = 2;
        assert_eq!(cfg.validate(), Err(ConfigError::RowOverlap(0)));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut cfg = OsdConfig::default();
        cfg.size_mult = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroScale));
    }

    #[test]
    fn test_analog_channel_range() {
        let mut cfg = OsdConfig::default();
        cfg.analog_channels = 1;
        assert_eq!(cfg.validate(), Err(ConfigError::AnalogChannels));
        cfg.analog_channels = 3;
        assert_eq!(cfg.validate(), Ok(()));
    }
}
