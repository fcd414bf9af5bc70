//! Sync-edge task: the per-line hot path
//!
//! Composite sync is active low. Every pulse start wakes this task,
//! which settles for ~5 us and samples the pin again: a horizontal
//! pulse (~4.7 us) has already ended, a vertical pulse is still low.
//! That classified edge drives the scheduler, and any render op it
//! returns is streamed out before the visible part of the line begins.
//!
//! Everything on this path is bounded: one branch on the cached line
//! class, at most `row_chars + 1` SPI bytes, no allocation, no await
//! points between the edge and the render.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{block_for, Duration};

use scanline_core::config::OsdConfig;
use scanline_core::render::{draw_graphics_line, draw_text_line};
use scanline_core::sched::{FrameSignal, LineScheduler, RenderOp, SyncEdge};

use crate::channels::{SharedOverlay, FRAME_SIGNAL};
use crate::gfx::GFX;
use crate::sink::OverlaySink;

/// Settle time between the pulse start and the level sample that tells
/// horizontal from vertical sync.
const SETTLE_US: u64 = 5;

#[embassy_executor::task]
pub async fn sync_task(
    mut sync_pin: Input<'static>,
    mut sink: OverlaySink,
    overlay: &'static SharedOverlay,
    config: OsdConfig,
) {
    info!(
        "Sync task started ({} rows, last line {})",
        config.row_triggers.len(),
        config.last_line
    );

    let mut scheduler = LineScheduler::new(&config);
    let columns = config.row_chars;

    loop {
        sync_pin.wait_for_falling_edge().await;
        block_for(Duration::from_micros(SETTLE_US));
        let edge = if sync_pin.is_high() {
            SyncEdge::HSync
        } else {
            SyncEdge::VSync
        };

        if let Some(op) = scheduler.on_sync(edge) {
            overlay.lock(|cell| {
                let overlay = cell.borrow();
                match op {
                    RenderOp::Text { row, glyph_line } => {
                        draw_text_line(
                            &mut sink,
                            overlay.row(row),
                            overlay.pixmap(row),
                            glyph_line,
                            columns,
                        );
                    }
                    RenderOp::Graphics { region_line } => {
                        draw_graphics_line(&mut sink, &GFX, region_line);
                    }
                }
            });
        }

        let signal = scheduler.take_signal();
        if signal != FrameSignal::None {
            FRAME_SIGNAL.signal(signal);
        }
    }
}
