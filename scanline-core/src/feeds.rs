//! External data feed snapshots
//!
//! The overlay consumes read-only snapshots of its collaborators: a soft
//! clock, analog channel readings, the position feed and the home
//! reference. Acquisition (ADC sampling, NMEA parsing, home math) lives
//! outside this crate; the formatter only turns these values into text.

use heapless::Vec;

use crate::config::MAX_ANALOG_CHANNELS;

/// Wall-clock style counter, advanced once per second by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
}

impl ClockTime {
    /// Advance by one second, wrapping at 24h
    pub fn tick(&mut self) {
        self.sec += 1;
        if self.sec == 60 {
            self.sec = 0;
            self.min += 1;
        }
        if self.min == 60 {
            self.min = 0;
            self.hour += 1;
        }
        if self.hour == 24 {
            self.hour = 0;
        }
    }
}

/// One analog channel reading in centivolts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogReading {
    /// Measured voltage × 100 (e.g. 1180 = 11.80 V)
    pub volts_x100: u16,
}

impl AnalogReading {
    /// Whole-volt part
    pub fn volts_whole(&self) -> u16 {
        self.volts_x100 / 100
    }

    /// Centivolt remainder (0..100)
    pub fn volts_frac(&self) -> u16 {
        self.volts_x100 % 100
    }

    /// Reading as a percentage of a calibrated floor..ceiling span,
    /// clamped to 0..=100.
    pub fn level_percent(&self, floor_x100: u16, ceil_x100: u16) -> u8 {
        if ceil_x100 <= floor_x100 {
            return 0;
        }
        let clamped = self.volts_x100.clamp(floor_x100, ceil_x100);
        let span = (ceil_x100 - floor_x100) as u32;
        ((clamped - floor_x100) as u32 * 100 / span) as u8
    }
}

/// Last valid position-feed record
///
/// Coordinates are in packed degree-minute form: degrees × 1_000_000
/// plus minutes × 10_000 plus decimal minutes, signed by hemisphere.
/// A coordinate of 0 means "no data yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpsFix {
    pub latitude: i32,
    pub longitude: i32,
    /// Altitude above sea level in meters
    pub altitude_m: i32,
    /// Ground speed in km/h
    pub speed: i32,
    /// Course over ground in degrees
    pub heading_deg: u16,
    /// Satellites in view
    pub sats: u8,
    /// Feed reports a usable fix
    pub has_fix: bool,
}

/// Home position reference derived from the position feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomePoint {
    /// Distance from home in meters
    pub distance_m: u32,
    /// Bearing back to home in degrees
    pub bearing_deg: u16,
    /// Home position has been captured
    pub is_set: bool,
    /// Home altitude in meters (for relative altitude display)
    pub altitude_m: i32,
}

/// Everything the row formatter reads in one refresh cycle
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedSnapshot {
    pub clock: ClockTime,
    pub analog: Vec<AnalogReading, MAX_ANALOG_CHANNELS>,
    pub gps: GpsFix,
    pub home: HomePoint,
}
