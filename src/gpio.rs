//! Linux GPIO character-device adapter.
//!
//! Wraps `gpiod` output lines in embedded-hal 1.0 [`OutputPin`]s so the rest
//! of the crate stays hardware-agnostic. Failure to acquire any line at
//! startup is fatal: the system cannot run with partial axis control and
//! fails closed before any motion is commanded.

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use gpiod::{Chip, Lines, Options, Output};

use crate::config::AxisConfig;
use crate::error::{AxisError, Error, Result};

/// Error from a GPIO line operation.
#[derive(Debug)]
pub struct GpioError(std::io::Error);

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One requested output line.
pub struct GpioLine {
    lines: Lines<Output>,
}

impl ErrorType for GpioLine {
    type Error = GpioError;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.lines.set_values([false]).map_err(GpioError)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.lines.set_values([true]).map_err(GpioError)
    }
}

/// The three requested outputs of one axis, in (step, dir, enable) order.
pub type AxisLines = (GpioLine, GpioLine, GpioLine);

/// Request one axis's step/dir/enable lines as outputs.
///
/// Initial values are safe: step low, direction at the `Positive` level,
/// enable at its physically disabled level.
pub fn open_axis(config: &AxisConfig) -> Result<AxisLines> {
    let chip = Chip::new(&config.chip).map_err(|e| {
        Error::Axis(AxisError::ChipOpen {
            chip: config.chip.clone(),
            message: e.to_string(),
        })
    })?;

    let step = request_output(&chip, config.step_line, &config.name, false)?;
    let dir = request_output(
        &chip,
        config.dir_line,
        &config.name,
        !config.invert_direction,
    )?;
    let enable = request_output(
        &chip,
        config.enable_line,
        &config.name,
        config.invert_enable,
    )?;

    Ok((step, dir, enable))
}

fn request_output(chip: &Chip, line: u32, consumer: &str, initial: bool) -> Result<GpioLine> {
    let options = Options::output([line]).values([initial]).consumer(consumer);

    let lines = chip.request_lines(options).map_err(|e| {
        Error::Axis(AxisError::LineRequest {
            line,
            message: e.to_string(),
        })
    })?;

    Ok(GpioLine { lines })
}
