//! Embassy async tasks
//!
//! The sync task owns the line-rate hot path; the refresh task does all
//! slow-path formatting between frames. They communicate via
//! channels/signals.

pub mod refresh;
pub mod sync;

pub use refresh::refresh_task;
pub use sync::sync_task;
