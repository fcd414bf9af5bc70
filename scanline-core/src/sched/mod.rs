//! Sync-triggered line scheduling
//!
//! The real-time core: classifies every scan line and dispatches the
//! per-line renderers from the sync edge handler.

mod line;

pub use line::{FrameSignal, LineClass, LineScheduler, RenderOp, SyncEdge};
