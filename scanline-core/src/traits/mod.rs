//! Hardware abstraction traits
//!
//! These traits define the seams between the per-line render logic and
//! hardware-specific implementations.

pub mod graphics;
pub mod sink;

pub use graphics::GraphicsSource;
pub use sink::PixelSink;
