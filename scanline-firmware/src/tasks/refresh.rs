//! Row refresh task: the slow path
//!
//! Waits on the frame signal from the sync task. RowDone reformats
//! exactly the row the beam just finished, so the new content shows up
//! the next time that row is scanned. FrameDone drives the feed
//! sampling and the soft clock.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use heapless::Vec;

use scanline_core::config::{VideoStandard, MAX_ANALOG_CHANNELS};
use scanline_core::feeds::{AnalogReading, FeedSnapshot};
use scanline_core::font::Font6x8;
use scanline_core::sched::FrameSignal;

use crate::channels::{SharedOverlay, FRAME_SIGNAL};

/// ADC reference in centivolts and full-scale count
const ADC_VREF_X100: u32 = 330;
const ADC_MAX: u32 = 4096;

/// Battery sense divider ratio × 100 (5.6:1 brings a 4S pack into range)
const BATTERY_DIVIDER_X100: u32 = 560;

/// RSSI feeds the pin directly
const DIRECT_X100: u32 = 100;

fn raw_to_centivolts(raw: u16, divider_x100: u32) -> u16 {
    (raw as u32 * ADC_VREF_X100 * divider_x100 / (ADC_MAX * 100)) as u16
}

#[embassy_executor::task]
pub async fn refresh_task(
    mut adc: Adc<'static, Async>,
    mut adc_channels: Vec<Channel<'static>, MAX_ANALOG_CHANNELS>,
    overlay: &'static SharedOverlay,
    standard: VideoStandard,
) {
    info!("Refresh task started ({} analog channels)", adc_channels.len());

    let mut feeds = FeedSnapshot::default();
    for _ in 0..adc_channels.len() {
        let _ = feeds.analog.push(AnalogReading::default());
    }

    let fields_per_second = standard.fields_per_second() as u32;
    let mut fields: u32 = 0;

    loop {
        match FRAME_SIGNAL.wait().await {
            FrameSignal::RowDone(row) => {
                overlay.lock(|cell| {
                    cell.borrow_mut().refresh_row(row, &feeds, &Font6x8);
                });
            }
            FrameSignal::FrameDone => {
                // The RSSI channel sits last and has no divider on it
                let rssi_index = adc_channels.len() - 1;
                for (i, channel) in adc_channels.iter_mut().enumerate() {
                    let divider = if i == rssi_index {
                        DIRECT_X100
                    } else {
                        BATTERY_DIVIDER_X100
                    };
                    match adc.read(channel).await {
                        Ok(raw) => {
                            feeds.analog[i].volts_x100 = raw_to_centivolts(raw, divider);
                        }
                        Err(_) => warn!("ADC read error on channel {}", i),
                    }
                }

                fields += 1;
                if fields >= fields_per_second {
                    fields = 0;
                    feeds.clock.tick();
                    trace!(
                        "Clock {}:{}:{}",
                        feeds.clock.hour,
                        feeds.clock.min,
                        feeds.clock.sec
                    );
                }
            }
            FrameSignal::None => {}
        }
    }
}
