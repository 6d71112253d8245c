//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Frame dimensions are positive
/// - The dead zone fits inside half of each frame extent
/// - Each axis's period floor is positive and no larger than the base period
/// - No GPIO line is used twice within one axis
/// - The minimum blob area is non-negative
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.frame.width == 0 || config.frame.height == 0 {
        return Err(Error::Config(ConfigError::InvalidFrameSize {
            width: config.frame.width,
            height: config.frame.height,
        }));
    }

    for extent in [config.frame.width, config.frame.height] {
        if u64::from(config.servo.dead_zone_px) * 2 >= u64::from(extent) {
            return Err(Error::Config(ConfigError::InvalidDeadZone {
                dead_zone: config.servo.dead_zone_px,
                extent,
            }));
        }
    }

    if config.servo.min_area < 0.0 {
        return Err(Error::Config(ConfigError::InvalidMinArea(
            config.servo.min_area,
        )));
    }

    for (name, axis) in config.axes.iter() {
        validate_axis(name, axis, config)?;
    }

    Ok(())
}

fn validate_axis(name: &str, axis: &super::AxisConfig, config: &SystemConfig) -> Result<()> {
    // Period floor must be positive and reachable from the base period
    if axis.min_step_period_us == 0 || axis.min_step_period_us > config.servo.base_period_us {
        return Err(Error::Config(ConfigError::InvalidStepPeriodFloor {
            min_us: axis.min_step_period_us,
            base_us: config.servo.base_period_us,
        }));
    }

    // The three outputs must be distinct lines
    let lines = [axis.step_line, axis.dir_line, axis.enable_line];
    for (i, line) in lines.iter().enumerate() {
        if lines[i + 1..].contains(line) {
            return Err(Error::Config(ConfigError::DuplicateGpioLine {
                axis: name.to_string(),
                line: *line,
            }));
        }
    }

    Ok(())
}
