//! Axis configuration from TOML.

use std::time::Duration;

use serde::Deserialize;

/// Complete hardware configuration for one axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name.
    pub name: String,

    /// GPIO chip name or path (e.g. "gpiochip0").
    #[serde(default = "default_chip")]
    pub chip: String,

    /// Line offset of the STEP output.
    pub step_line: u32,

    /// Line offset of the DIR output.
    pub dir_line: u32,

    /// Line offset of the ENABLE output.
    pub enable_line: u32,

    /// Safety floor for the step half-period, in microseconds.
    ///
    /// Periods below this are rejected by the shared state; the floor
    /// protects the motor's torque/resonance region.
    #[serde(default = "default_min_step_period_us")]
    pub min_step_period_us: u64,

    /// Poll interval while the axis is disabled, in milliseconds.
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,

    /// Whether the enable output is active-low (the common driver polarity).
    #[serde(default = "default_invert_enable")]
    pub invert_enable: bool,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_chip() -> String {
    "gpiochip0".to_string()
}

fn default_min_step_period_us() -> u64 {
    200
}

fn default_idle_poll_ms() -> u64 {
    10
}

fn default_invert_enable() -> bool {
    true
}

impl AxisConfig {
    /// The step-period safety floor as a `Duration`.
    pub fn min_step_period(&self) -> Duration {
        Duration::from_micros(self.min_step_period_us)
    }

    /// The disabled-poll interval as a `Duration`.
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}
