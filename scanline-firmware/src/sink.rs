//! SPI pixel sink
//!
//! Streams overlay bytes out of the SPI TX line, MSB first, one byte
//! per character column. A separate GPIO gates the video switch so the
//! overlay only replaces camera video where there is actually ink.

use cortex_m::asm;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embedded_hal::spi::SpiBus;

use scanline_core::traits::PixelSink;

/// Inter-byte pad in CPU cycles for normal-size text.
///
/// Stretches each character column so 30 columns span the visible part
/// of a 52 us line. Small text drops the pad and doubles the SPI clock
/// instead, halving the glyph width on screen.
const PAD_CYCLES: u32 = 24;

/// Byte-serial pixel sink over any blocking SPI bus plus the
/// overlay-enable pin.
pub struct SpiPixelSink<B: SpiBus<u8>> {
    spi: B,
    active: Output<'static>,
    pad_cycles: u32,
}

/// The sink as wired on this board: SPI0 TX, blocking mode.
pub type OverlaySink = SpiPixelSink<Spi<'static, SPI0, Blocking>>;

impl<B: SpiBus<u8>> SpiPixelSink<B> {
    pub fn new(spi: B, active: Output<'static>, small_text: bool) -> Self {
        Self {
            spi,
            active,
            pad_cycles: if small_text { 0 } else { PAD_CYCLES },
        }
    }
}

impl<B: SpiBus<u8>> PixelSink for SpiPixelSink<B> {
    fn set_active(&mut self, active: bool) {
        if active {
            self.active.set_high();
        } else {
            self.active.set_low();
        }
    }

    fn write(&mut self, byte: u8) {
        // A lost byte only blanks one column for one field, so the
        // write result is deliberately not propagated into the line
        // timing path.
        let _ = self.spi.write(&[byte]);
        if self.pad_cycles > 0 {
            asm::delay(self.pad_cycles);
        }
    }
}
