//! Per-line scheduling state machine
//!
//! Runs once per sync edge with a microsecond budget. The expensive
//! decision (what kind of line comes next) is made at the start of a
//! line, where slack is plentiful; the render dispatch at the end of
//! the line then reduces to a single branch on the cached class.
//!
//! A missed deadline is one glitched line, nothing more: every accepted
//! V-sync rewinds the whole machine to the top of the frame, so any
//! desynchronization is bounded to one frame.

use heapless::Vec;

use crate::config::{OsdConfig, MAX_TEXT_ROWS};

/// Disambiguated sync edge, as sampled by the caller after the
/// settling delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncEdge {
    /// Line boundary
    HSync,
    /// Frame boundary candidate
    VSync,
}

/// Classification of the line currently in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineClass {
    #[default]
    None,
    Text,
    Graphics,
}

/// Safe-point handoff from the sync handler to the refresh loop.
///
/// Single writer (the sync handler), single reader (the refresh loop,
/// via [`LineScheduler::take_signal`]). One slot: a slow reader sees
/// only the latest signal, which costs a stale row for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameSignal {
    #[default]
    None,
    /// The frame's last line was reached
    FrameDone,
    /// This row's last visible line just rendered; safe to refresh it
    RowDone(u8),
}

/// Render dispatch for the line that just completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOp {
    Text {
        /// Row whose pixmap to stream
        row: u8,
        /// Glyph row within the pixmap
        glyph_line: u8,
    },
    Graphics {
        /// Line offset within the graphics region
        region_line: u16,
    },
}

/// Sync-triggered line scheduler
///
/// Owns the line counter and active row index exclusively; both mutate
/// only inside [`on_sync`](Self::on_sync). Everything copied from the
/// config at construction is read-only afterwards.
#[derive(Debug)]
pub struct LineScheduler {
    // Read-only after construction
    triggers: Vec<u16, MAX_TEXT_ROWS>,
    row_height: u16,
    size_mult: u16,
    graphics: Option<(u16, u16)>,
    last_line: u16,
    vsync_reset_line: u16,

    // Mutated only in the sync handler
    line: u16,
    active_row: u8,
    active_trigger: u16,
    class: LineClass,
    signal: FrameSignal,
}

impl LineScheduler {
    /// Build from a validated config
    pub fn new(cfg: &OsdConfig) -> Self {
        debug_assert!(
            !cfg.row_triggers.is_empty(),
            "scheduler requires a validated config with at least one row"
        );
        let mut triggers = Vec::new();
        for &t in cfg.row_triggers.iter() {
            let _ = triggers.push(t);
        }
        let active_trigger = triggers.first().copied().unwrap_or(0);
        Self {
            triggers,
            row_height: cfg.row_height(),
            size_mult: cfg.size_mult as u16,
            graphics: cfg.graphics.map(|g| (g.start_line, g.height)),
            last_line: cfg.last_line,
            vsync_reset_line: cfg.vsync_reset_line,
            line: 0,
            active_row: 0,
            active_trigger,
            class: LineClass::None,
            signal: FrameSignal::None,
        }
    }

    /// Current line counter
    pub fn line(&self) -> u16 {
        self.line
    }

    /// Row currently being tracked for rendering
    pub fn active_row(&self) -> u8 {
        self.active_row
    }

    /// Cached classification of the line in progress
    pub fn line_class(&self) -> LineClass {
        self.class
    }

    /// Consume the pending refresh signal, clearing the slot
    pub fn take_signal(&mut self) -> FrameSignal {
        core::mem::replace(&mut self.signal, FrameSignal::None)
    }

    /// Handle one sync edge.
    ///
    /// For a horizontal edge, returns the render dispatch for the line
    /// that just completed (already classified last edge), then advances
    /// the counter and pre-classifies the upcoming line. For a vertical
    /// edge, rewinds to the top of frame if the counter is past the
    /// reset threshold; earlier V-sync levels are equalizing pulses and
    /// are ignored.
    pub fn on_sync(&mut self, edge: SyncEdge) -> Option<RenderOp> {
        match edge {
            SyncEdge::HSync => self.on_hsync(),
            SyncEdge::VSync => {
                self.on_vsync();
                None
            }
        }
    }

    fn on_hsync(&mut self) -> Option<RenderOp> {
        // Line 0 is the very first edge after a frame reset; there is
        // no completed line to render yet.
        let completed = if self.line != 0 { self.render_op() } else { None };

        self.class = LineClass::None;
        self.line = self.line.saturating_add(1);

        if self.line == self.last_line {
            self.signal = FrameSignal::FrameDone;
            return completed;
        }

        let span_end = self.active_trigger + self.row_height;
        if self.line >= self.active_trigger && self.line < span_end {
            self.class = LineClass::Text;
        } else if self.line == span_end {
            // The active row's last line just rendered above; hand the
            // row to the refresh loop and start tracking the next one.
            self.signal = FrameSignal::RowDone(self.active_row);
            self.active_row = (self.active_row + 1) % self.triggers.len() as u8;
            self.active_trigger = self.triggers[self.active_row as usize];
        } else if let Some((start, height)) = self.graphics {
            if self.line >= start && self.line < start + height {
                self.class = LineClass::Graphics;
            }
        }

        completed
    }

    fn on_vsync(&mut self) {
        if self.line > self.vsync_reset_line {
            self.line = 0;
            self.active_row = 0;
            self.active_trigger = self.triggers.first().copied().unwrap_or(0);
            self.class = LineClass::None;
        }
    }

    /// Dispatch for the line in progress; a single branch on the class
    /// cached at the start of the line.
    fn render_op(&self) -> Option<RenderOp> {
        match self.class {
            LineClass::None => None,
            LineClass::Text => Some(RenderOp::Text {
                row: self.active_row,
                glyph_line: ((self.line - self.active_trigger) / self.size_mult) as u8,
            }),
            LineClass::Graphics => self.graphics.map(|(start, _)| RenderOp::Graphics {
                region_line: self.line - start,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphicsConfig, OsdConfig};

    /// Reference layout: 5 rows, triggers every 20 lines,
    /// row height 18.
    fn scenario_config() -> OsdConfig {
        let mut cfg = OsdConfig::default();
        cfg.row_triggers.clear();
        for t in [0u16, 20, 40, 60, 80] {
            cfg.row_triggers.push(t).unwrap();
        }
        cfg.char_height = 18;
        cfg.size_mult = 1;
        cfg.graphics = None;
        cfg.last_line = 312;
        cfg.vsync_reset_line = 200;
        cfg.validate().unwrap();
        cfg
    }

    fn hsync_to_line(sched: &mut LineScheduler, line: u16) {
        while sched.line() < line {
            sched.on_sync(SyncEdge::HSync);
        }
        assert_eq!(sched.line(), line);
    }

    #[test]
    #[should_panic(expected = "at least one row")]
    fn test_empty_trigger_table_asserts() {
        let mut cfg = scenario_config();
        cfg.row_triggers.clear();
        let _ = LineScheduler::new(&cfg);
    }

    #[test]
    fn test_first_edge_renders_nothing() {
        let mut sched = LineScheduler::new(&scenario_config());
        assert_eq!(sched.on_sync(SyncEdge::HSync), None);
        assert_eq!(sched.line(), 1);
    }

    #[test]
    fn test_text_classification_mid_row() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 25);

        // Line 25 sits in row 1's span (20..38) at local offset 5
        assert_eq!(sched.active_row(), 1);
        assert_eq!(sched.line_class(), LineClass::Text);
        let op = sched.on_sync(SyncEdge::HSync);
        assert_eq!(
            op,
            Some(RenderOp::Text {
                row: 1,
                glyph_line: 5
            })
        );
    }

    #[test]
    fn test_row_done_advances_active_row() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 38);

        // Line 38 == trigger[1] + 18: row 1 finished, row 2 is next
        assert_eq!(sched.take_signal(), FrameSignal::RowDone(1));
        assert_eq!(sched.active_row(), 2);
        assert_eq!(sched.line_class(), LineClass::None);
    }

    #[test]
    fn test_row_done_line_renders_last_text_line() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 37);
        // The edge that moves 37 -> 38 must still render line 37,
        // row 1's last visible line.
        let op = sched.on_sync(SyncEdge::HSync);
        assert_eq!(
            op,
            Some(RenderOp::Text {
                row: 1,
                glyph_line: 17
            })
        );
    }

    #[test]
    fn test_rows_wrap_modulo_row_count() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 98);
        // Line 98 == trigger[4] + 18: last row finished, wrap to row 0
        assert_eq!(sched.take_signal(), FrameSignal::RowDone(4));
        assert_eq!(sched.active_row(), 0);
    }

    #[test]
    fn test_frame_done_at_last_line() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 312);
        assert_eq!(sched.take_signal(), FrameSignal::FrameDone);
        assert_eq!(sched.line_class(), LineClass::None);
    }

    #[test]
    fn test_take_signal_clears_slot() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 18);
        assert_eq!(sched.take_signal(), FrameSignal::RowDone(0));
        assert_eq!(sched.take_signal(), FrameSignal::None);
    }

    #[test]
    fn test_vsync_reset_past_threshold() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 250);
        sched.on_sync(SyncEdge::VSync);
        assert_eq!(sched.line(), 0);
        assert_eq!(sched.active_row(), 0);
        assert_eq!(sched.line_class(), LineClass::None);
    }

    #[test]
    fn test_vsync_below_threshold_ignored() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 50);
        let row = sched.active_row();
        sched.on_sync(SyncEdge::VSync);
        assert_eq!(sched.line(), 50);
        assert_eq!(sched.active_row(), row);
    }

    #[test]
    fn test_runaway_counter_recovers_next_frame() {
        let mut sched = LineScheduler::new(&scenario_config());
        // Missed V-sync: counter runs far past the frame
        hsync_to_line(&mut sched, 400);
        assert_eq!(sched.line_class(), LineClass::None);
        sched.on_sync(SyncEdge::VSync);
        assert_eq!(sched.line(), 0);

        // Next frame classifies normally again
        hsync_to_line(&mut sched, 5);
        assert_eq!(sched.line_class(), LineClass::Text);
        assert_eq!(sched.active_row(), 0);
    }

    #[test]
    fn test_graphics_region_classification() {
        let mut cfg = scenario_config();
        cfg.graphics = Some(GraphicsConfig {
            start_line: 170,
            height: 16,
            width_bytes: 8,
        });
        let mut sched = LineScheduler::new(&cfg);

        hsync_to_line(&mut sched, 169);
        assert_eq!(sched.line_class(), LineClass::None);

        hsync_to_line(&mut sched, 170);
        assert_eq!(sched.line_class(), LineClass::Graphics);
        let op = sched.on_sync(SyncEdge::HSync);
        assert_eq!(op, Some(RenderOp::Graphics { region_line: 0 }));

        hsync_to_line(&mut sched, 186);
        assert_eq!(sched.line_class(), LineClass::None);
    }

    #[test]
    fn test_graphics_disabled_classifies_none() {
        let mut sched = LineScheduler::new(&scenario_config());
        hsync_to_line(&mut sched, 170);
        assert_eq!(sched.line_class(), LineClass::None);
    }

    #[test]
    fn test_scaled_rows_halve_glyph_line() {
        let mut cfg = OsdConfig::default();
        cfg.row_triggers.clear();
        cfg.row_triggers.push(20).unwrap();
        cfg.char_height = 8;
        cfg.size_mult = 2;
        cfg.graphics = None;
        cfg.validate().unwrap();

        let mut sched = LineScheduler::new(&cfg);
        hsync_to_line(&mut sched, 25);
        let op = sched.on_sync(SyncEdge::HSync);
        // Local line 5, doubled glyphs: glyph row 2
        assert_eq!(
            op,
            Some(RenderOp::Text {
                row: 0,
                glyph_line: 2
            })
        );
    }
}
