//! Physical axis boundary: step, direction, and enable outputs.
//!
//! Generic over embedded-hal 1.0 pin types. The enable polarity inversion
//! (logical enabled <-> physical active-low) is applied here and nowhere
//! else, so policy code always reasons in logical terms.

use embedded_hal::digital::OutputPin;

use crate::error::{AxisError, Result};

use super::Direction;

/// The three outputs of one axis.
///
/// Direction and enable levels are cached to avoid redundant pin writes.
pub struct AxisPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// STEP output (pulse to move one step).
    step: STEP,

    /// DIR output (latched direction level).
    dir: DIR,

    /// ENABLE output (typically active-low on stepper drivers).
    enable: EN,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Whether the enable output is active-low.
    invert_enable: bool,

    /// Last direction written, if any.
    last_direction: Option<Direction>,

    /// Last logical enable written, if any.
    last_enabled: Option<bool>,
}

fn drive<P: OutputPin>(pin: &mut P, high: bool, name: &'static str) -> Result<()> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| AxisError::PinWrite(name).into())
}

impl<STEP, DIR, EN> AxisPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// Take ownership of the three outputs and drive safe defaults:
    /// motor disabled, direction `Positive`.
    pub fn new(step: STEP, dir: DIR, enable: EN, invert_direction: bool, invert_enable: bool) -> Result<Self> {
        let mut pins = Self {
            step,
            dir,
            enable,
            invert_direction,
            invert_enable,
            last_direction: None,
            last_enabled: None,
        };
        pins.set_enabled(false)?;
        pins.set_direction(Direction::Positive)?;
        Ok(pins)
    }

    /// Set the step output level.
    pub fn set_step(&mut self, high: bool) -> Result<()> {
        drive(&mut self.step, high, "step")
    }

    /// Latch the direction output. Redundant writes are skipped.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.last_direction == Some(direction) {
            return Ok(());
        }

        let high = match direction {
            Direction::Positive => !self.invert_direction,
            Direction::Negative => self.invert_direction,
        };
        drive(&mut self.dir, high, "dir")?;

        self.last_direction = Some(direction);
        Ok(())
    }

    /// Set the logical enable state. Redundant writes are skipped.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.last_enabled == Some(enabled) {
            return Ok(());
        }

        let high = if self.invert_enable { !enabled } else { enabled };
        drive(&mut self.enable, high, "enable")?;

        self.last_enabled = Some(enabled);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (STEP, DIR, EN) {
        (self.step, self.dir, self.enable)
    }
}
