//! Timed byte sink trait for pixel output

/// Byte-serial pixel output with an "active" gating line
///
/// One byte carries the pixels of one character cell on one scan line.
/// Implementations own the pacing: `write` must not return before the
/// minimum inter-byte spacing for the configured pixel rate has elapsed,
/// so the render loop stays portable across targets while the delay
/// mechanics stay hardware-specific.
///
/// The trait is infallible on purpose. A late or dropped byte shows up
/// as one glitched line and the next frame repaints it; there is no
/// error to propagate and no time to handle one.
pub trait PixelSink {
    /// Gate overlay visibility for the bytes that follow
    fn set_active(&mut self, active: bool);

    /// Shift out one pixel byte, honoring the minimum inter-byte spacing
    fn write(&mut self, byte: u8);
}
