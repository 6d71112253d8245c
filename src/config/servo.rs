//! Servo policy configuration from TOML.

use std::time::Duration;

use serde::Deserialize;

/// Servo policy parameters shared by both axis controllers.
///
/// The defaults reproduce the deployed tracking constants: a 1 ms base
/// half-period reduced by up to 1.95 ms proportionally with the offset
/// fraction of the frame extent.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ServoConfig {
    /// Pixel band around frame center treated as "already centered".
    #[serde(default = "default_dead_zone_px")]
    pub dead_zone_px: u32,

    /// Step half-period at the dead-zone edge, in microseconds.
    #[serde(default = "default_base_period_us")]
    pub base_period_us: u64,

    /// Proportional reduction at full-extent offset, in microseconds.
    #[serde(default = "default_gain_us")]
    pub gain_us: u64,

    /// Consecutive undetected frames to coast through before disabling.
    ///
    /// A frame-count budget, not a timeout: slower detection cadence
    /// extends the coasting duration in real time.
    #[serde(default = "default_max_lost_frames")]
    pub max_lost_frames: u32,

    /// Minimum blob area (zeroth moment) for a detection to count.
    #[serde(default = "default_min_area")]
    pub min_area: f64,
}

fn default_dead_zone_px() -> u32 {
    50
}

fn default_base_period_us() -> u64 {
    1000
}

fn default_gain_us() -> u64 {
    1950
}

fn default_max_lost_frames() -> u32 {
    10
}

fn default_min_area() -> f64 {
    1200.0
}

impl ServoConfig {
    /// The base half-period as a `Duration`.
    pub fn base_period(&self) -> Duration {
        Duration::from_micros(self.base_period_us)
    }

    /// The proportional gain as a `Duration`.
    pub fn gain(&self) -> Duration {
        Duration::from_micros(self.gain_us)
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            dead_zone_px: default_dead_zone_px(),
            base_period_us: default_base_period_us(),
            gain_us: default_gain_us(),
            max_lost_frames: default_max_lost_frames(),
            min_area: default_min_area(),
        }
    }
}
