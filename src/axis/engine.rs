//! Step pulse engine: the fast per-axis waveform loop.
//!
//! One engine per axis runs as an independent unit of concurrency for the
//! lifetime of the axis, sampling the shared command state at its own pace.
//! It must never be starved by, nor block, the decision domain; the two
//! domains communicate only through the overwrite-in-place [`SharedAxis`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use tracing::{debug, error};

use crate::error::Result;

use super::{AxisPins, SharedAxis};

/// Continuously running pulse generator for one axis.
pub struct StepPulseEngine<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    pins: AxisPins<STEP, DIR, EN>,
    delay: DELAY,
    shared: SharedAxis,
    name: String,
    idle_poll: Duration,
}

impl<STEP, DIR, EN, DELAY> StepPulseEngine<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create an engine over one axis's outputs and shared state.
    ///
    /// `idle_poll` is the re-check interval while the axis is disabled; it
    /// bounds how quickly the engine observes a re-enable or shutdown.
    pub fn new(
        pins: AxisPins<STEP, DIR, EN>,
        delay: DELAY,
        shared: SharedAxis,
        name: &str,
        idle_poll: Duration,
    ) -> Self {
        Self {
            pins,
            delay,
            shared,
            name: name.to_string(),
            idle_poll,
        }
    }

    /// The axis name used for logging and thread naming.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the shared command state this engine samples.
    #[inline]
    pub fn shared(&self) -> &SharedAxis {
        &self.shared
    }

    /// One loop iteration.
    ///
    /// Direction and period are re-read fresh from the shared snapshot;
    /// a change takes effect on the next full low/high cycle and never
    /// splits a pulse.
    pub fn cycle(&mut self) -> Result<()> {
        let state = self.shared.snapshot();

        self.pins.set_direction(state.direction)?;
        self.pins.set_enabled(state.enabled)?;

        if state.enabled {
            self.pins.set_step(true)?;
            self.pause(state.step_period);
            self.pins.set_step(false)?;
            self.pause(state.step_period);
        } else {
            // Coarser poll while disabled to avoid busy-spinning.
            self.pause(self.idle_poll);
        }

        Ok(())
    }

    /// Run cycles until `shutdown` is observed.
    ///
    /// On any pin fault the axis is forced disabled and the error is
    /// returned; this is fatal to this axis only and must not block the
    /// other axis or the decision loop. On a normal shutdown the enable
    /// output is driven off before returning.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<()> {
        debug!(axis = %self.name, "pulse engine started");

        while !shutdown.load(Ordering::SeqCst) {
            if let Err(e) = self.cycle() {
                error!(axis = %self.name, error = %e, "pulse cycle failed, disabling axis");
                self.shared.force_disable();
                let _ = self.pins.set_enabled(false);
                return Err(e);
            }
        }

        self.shared.force_disable();
        self.pins.set_enabled(false)?;
        debug!(axis = %self.name, "pulse engine stopped");
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        let ns = duration.as_nanos().min(u128::from(u32::MAX)) as u32;
        self.delay.delay_ns(ns);
    }
}
