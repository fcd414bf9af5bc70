//! Static graphics region content
//!
//! The scheduler only decides *when* a graphics line is due; the bytes
//! themselves come from this buffer. For now it holds a fixed border
//! and crosshair pattern so the region is visible on screen without any
//! upstream producer.

use scanline_core::traits::GraphicsSource;

pub const GFX_HEIGHT: usize = 16;
pub const GFX_WIDTH_BYTES: usize = 8;

pub struct GraphicsRegion {
    lines: [[u8; GFX_WIDTH_BYTES]; GFX_HEIGHT],
}

impl GraphicsRegion {
    const fn test_pattern() -> Self {
        let mut lines = [[0u8; GFX_WIDTH_BYTES]; GFX_HEIGHT];
        let mut y = 0;
        while y < GFX_HEIGHT {
            let mut x = 0;
            while x < GFX_WIDTH_BYTES {
                if y == 0 || y == GFX_HEIGHT - 1 {
                    lines[y][x] = 0xFF;
                } else {
                    let mut byte = 0u8;
                    if x == 0 {
                        byte |= 0x80;
                    }
                    if x == GFX_WIDTH_BYTES - 1 {
                        byte |= 0x01;
                    }
                    // Horizontal bar of the center cross
                    if y == GFX_HEIGHT / 2 {
                        byte = 0xFF;
                    }
                    // Vertical bar of the center cross
                    if x == GFX_WIDTH_BYTES / 2 {
                        byte |= 0x80;
                    }
                    lines[y][x] = byte;
                }
                x += 1;
            }
            y += 1;
        }
        Self { lines }
    }
}

impl GraphicsSource for GraphicsRegion {
    fn line(&self, region_line: u16) -> &[u8] {
        let idx = (region_line as usize).min(GFX_HEIGHT - 1);
        &self.lines[idx]
    }
}

/// The one region instance, baked at compile time.
pub static GFX: GraphicsRegion = GraphicsRegion::test_pattern();
