//! Per-frame fan-out of one detection to both axis controllers.

use tracing::debug;

use crate::axis::AxisId;
use crate::config::SystemConfig;
use crate::dispatch::CommandDispatcher;
use crate::error::{ConfigError, Result};

use super::{AxisServoController, Detection};

/// Servo-mode decision step for both axes.
///
/// Owns the two independent [`AxisServoController`]s and applies their
/// commands through the dispatcher, one pair per completed detector cycle.
pub struct ServoTracker {
    x: AxisServoController,
    y: AxisServoController,
}

impl ServoTracker {
    /// Build both controllers from configuration.
    ///
    /// Requires axes keyed `"x"` and `"y"`; each controller takes its own
    /// axis's period floor.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        Ok(Self {
            x: Self::controller_for(config, AxisId::X)?,
            y: Self::controller_for(config, AxisId::Y)?,
        })
    }

    fn controller_for(config: &SystemConfig, axis: AxisId) -> Result<AxisServoController> {
        let axis_config = config
            .hardware_axis(axis)
            .ok_or_else(|| ConfigError::AxisNotFound(axis.key().to_string()))?;
        Ok(AxisServoController::new(
            axis,
            &config.frame,
            &config.servo,
            axis_config.min_step_period(),
        ))
    }

    /// Decide and apply both axes' commands for one frame.
    ///
    /// Each axis's `(direction, period)` pair is applied atomically relative
    /// to its pulse engine's read.
    pub fn track(&mut self, detection: &Detection, dispatcher: &CommandDispatcher) {
        let x_command = self.x.update(detection);
        let y_command = self.y.update(detection);

        debug!(?detection, ?x_command, ?y_command, "frame decision");

        dispatcher.apply(AxisId::X, x_command);
        dispatcher.apply(AxisId::Y, y_command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const CONFIG: &str = r#"
[axes.x]
name = "X Axis"
step_line = 5
dir_line = 23
enable_line = 18

[axes.y]
name = "Y Axis"
step_line = 19
dir_line = 25
enable_line = 21
"#;

    #[test]
    fn from_config_requires_both_axes() {
        let config = parse_config(CONFIG).unwrap();
        assert!(ServoTracker::from_config(&config).is_ok());

        let partial = parse_config(
            r#"
[axes.x]
name = "X Axis"
step_line = 5
dir_line = 23
enable_line = 18
"#,
        )
        .unwrap();
        assert!(ServoTracker::from_config(&partial).is_err());
    }
}
