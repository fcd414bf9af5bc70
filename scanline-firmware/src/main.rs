//! Scanline - Analog Video OSD Overlay Firmware
//!
//! Main firmware binary for RP2040-based on-screen-display boards.
//! Splits the work between a per-line sync task (hot path) and a
//! per-frame refresh task (slow path), driven by the composite sync
//! signal of the camera video.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use scanline_core::config::{OsdConfig, VideoStandard, MAX_ANALOG_CHANNELS};
use scanline_core::feeds::FeedSnapshot;
use scanline_core::font::Font6x8;
use scanline_core::text::TextOverlay;

use crate::channels::SharedOverlay;
use crate::sink::SpiPixelSink;

mod channels;
mod gfx;
mod sink;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cell for the shared overlay (must live forever for task references)
static OVERLAY: StaticCell<SharedOverlay> = StaticCell::new();

/// Video standard for this build
const STANDARD: VideoStandard = VideoStandard::Pal;

/// Pixel clock for normal-size text
const PIXEL_CLOCK_HZ: u32 = 8_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Scanline firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Compile-time configuration; a broken preset is a build bug
    let config = OsdConfig::preset(STANDARD);
    if let Err(e) = config.validate() {
        defmt::panic!("invalid OSD configuration: {:?}", e);
    }
    info!(
        "OSD config: {} rows, {} columns, last line {}",
        config.row_triggers.len(),
        config.row_chars,
        config.last_line
    );

    // Composite sync from the video separator, active low
    let sync_pin = Input::new(p.PIN_2, Pull::Up);

    // SPI0 TX carries the pixel stream; small text doubles the clock
    // and the sink drops the inter-byte pads to match
    let mut spi_config = spi::Config::default();
    spi_config.frequency = if config.small_text {
        PIXEL_CLOCK_HZ * 2
    } else {
        PIXEL_CLOCK_HZ
    };
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let active_pin = Output::new(p.PIN_20, Level::Low);
    let sink = SpiPixelSink::new(spi, active_pin, config.small_text);

    info!("SPI pixel sink initialized");

    // ADC channels in overlay order: battery, optional aux, RSSI last
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let mut adc_channels: Vec<AdcChannel<'static>, MAX_ANALOG_CHANNELS> = Vec::new();
    let _ = adc_channels.push(AdcChannel::new_pin(p.PIN_26, Pull::None));
    if config.analog_channels >= 3 {
        let _ = adc_channels.push(AdcChannel::new_pin(p.PIN_27, Pull::None));
    }
    let _ = adc_channels.push(AdcChannel::new_pin(p.PIN_28, Pull::None));

    info!("ADC initialized");

    // Prime every row once so the first frame already shows content
    let mut text = TextOverlay::new(&config);
    let feeds = FeedSnapshot::default();
    for row in 0..text.row_count() {
        text.refresh_row(row, &feeds, &Font6x8);
    }
    let overlay: &'static SharedOverlay = OVERLAY.init(Mutex::new(RefCell::new(text)));

    // Spawn tasks
    spawner
        .spawn(tasks::sync_task(sync_pin, sink, overlay, config))
        .unwrap();
    spawner
        .spawn(tasks::refresh_task(adc, adc_channels, overlay, STANDARD))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
