//! Configuration types
//!
//! The configuration surface is fixed before the sync loop starts; there
//! is no runtime reconfiguration.

mod types;

pub use types::{
    ConfigError, GraphicsConfig, OsdConfig, VideoStandard, MAX_ANALOG_CHANNELS, MAX_ROW_CHARS,
    MAX_TEXT_ROWS,
};
