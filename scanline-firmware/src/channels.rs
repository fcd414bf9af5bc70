//! Inter-task communication channels
//!
//! Defines the static primitives used between the sync task and the
//! refresh task. Uses embassy-sync primitives for safe async
//! communication.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use scanline_core::sched::FrameSignal;
use scanline_core::text::TextOverlay;

/// Frame progress handoff from the sync task to the refresh task.
///
/// Single writer (sync task), single reader (refresh task). A `Signal`
/// keeps only the latest value, which matches the scheduler's
/// one-pending-signal contract: the refresh task always reacts to the
/// most recent frame event.
pub static FRAME_SIGNAL: Signal<CriticalSectionRawMutex, FrameSignal> = Signal::new();

/// The overlay shared between the sync task (reads pixmaps while
/// rendering) and the refresh task (rewrites one row at a time).
///
/// A blocking mutex is enough on a single core. The RowDone timing
/// guarantees the refresh task only touches a row the beam has just
/// finished, so the lock is never contended during a row's own lines.
pub type SharedOverlay = Mutex<CriticalSectionRawMutex, RefCell<TextOverlay>>;
