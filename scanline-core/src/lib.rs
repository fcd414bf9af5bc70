//! Board-agnostic core logic for the Scanline OSD firmware
//!
//! This crate contains all overlay logic that does not depend on
//! specific hardware implementations:
//!
//! - Sync-triggered line scheduler (the real-time core)
//! - Per-line text/graphics renderers over a timed byte sink
//! - Row formatter and pixmap cache
//! - Glyph lookup table
//! - Configuration type definitions
//! - External data feed snapshot types

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod feeds;
pub mod font;
pub mod render;
pub mod sched;
pub mod text;
pub mod traits;
