//! System configuration - root configuration structure.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::axis::AxisId;

use super::axis::AxisConfig;
use super::servo::ServoConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Video frame geometry.
    #[serde(default)]
    pub frame: FrameConfig,

    /// Servo policy parameters shared by both axes.
    #[serde(default)]
    pub servo: ServoConfig,

    /// Named axis configurations, keyed "x" and "y".
    pub axes: BTreeMap<String, AxisConfig>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes.get(name)
    }

    /// Get the configuration for a hardware axis by identifier.
    pub fn hardware_axis(&self, axis: AxisId) -> Option<&AxisConfig> {
        self.axes.get(axis.key())
    }

}

/// Video frame geometry the detector reports coordinates in.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FrameConfig {
    /// Frame width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Frame height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    360
}

impl FrameConfig {
    /// Center coordinate for the given axis.
    pub fn center(&self, axis: AxisId) -> i32 {
        (self.extent(axis) / 2) as i32
    }

    /// Full extent (width or height) for the given axis.
    pub fn extent(&self, axis: AxisId) -> u32 {
        match axis {
            AxisId::X => self.width,
            AxisId::Y => self.height,
        }
    }

    /// Bytes per raw BGR24 frame.
    pub fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}
