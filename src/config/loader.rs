//! Configuration loading from files.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_servo::load_config;
///
/// let config = load_config("servo.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(e.to_string())))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(e.message().to_string())))?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisId;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
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

        let config = parse_config(toml).unwrap();
        assert!(config.axis("x").is_some());
        assert!(config.hardware_axis(AxisId::Y).is_some());
        assert_eq!(config.frame.width, 640);
        assert_eq!(config.servo.dead_zone_px, 50);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[frame]
width = 1280
height = 720

[servo]
dead_zone_px = 40
base_period_us = 1200
gain_us = 2000
max_lost_frames = 5
min_area = 900.0

[axes.x]
name = "Pan"
chip = "gpiochip1"
step_line = 5
dir_line = 23
enable_line = 18
min_step_period_us = 150
invert_direction = true

[axes.y]
name = "Tilt"
step_line = 19
dir_line = 25
enable_line = 21
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.frame.height, 720);
        assert_eq!(config.servo.max_lost_frames, 5);

        let pan = config.axis("x").unwrap();
        assert_eq!(pan.chip, "gpiochip1");
        assert_eq!(pan.min_step_period_us, 150);
        assert!(pan.invert_direction);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let result = parse_config("[axes.x\nname =");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }
}
