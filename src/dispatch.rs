//! Command dispatcher: single owner of the two pulse engines.
//!
//! Arbitrates exactly one active command source (visual servo or keyboard
//! jog) and forwards decisions to the shared per-axis state that the pulse
//! threads sample. Shutdown forces both axes disabled before the threads
//! are joined, so motors never keep running after a control failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use tracing::{error, info};

use crate::axis::{AxisCommand, AxisId, Direction, SharedAxis, StepPulseEngine};
use crate::error::{AxisError, Result};

/// Owns both axes' shared state, the shutdown flag, and the pulse threads.
pub struct CommandDispatcher {
    x: SharedAxis,
    y: SharedAxis,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl CommandDispatcher {
    /// Create a dispatcher over the two axes' shared state.
    pub fn new(x: SharedAxis, y: SharedAxis) -> Self {
        Self {
            x,
            y,
            shutdown: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
        }
    }

    /// The shared state handle for one axis.
    pub fn shared(&self, axis: AxisId) -> &SharedAxis {
        match axis {
            AxisId::X => &self.x,
            AxisId::Y => &self.y,
        }
    }

    /// Clone of the shutdown flag, for signal handlers.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Start one pulse thread running the given engine.
    ///
    /// An engine error ends that axis's thread only; the other axis and the
    /// decision loop keep running.
    pub fn spawn_engine<STEP, DIR, EN, DELAY>(
        &mut self,
        mut engine: StepPulseEngine<STEP, DIR, EN, DELAY>,
    ) -> Result<()>
    where
        STEP: OutputPin + Send + 'static,
        DIR: OutputPin + Send + 'static,
        EN: OutputPin + Send + 'static,
        DELAY: DelayNs + Send + 'static,
    {
        let shutdown = Arc::clone(&self.shutdown);
        let handle = std::thread::Builder::new()
            .name(format!("pulse-{}", engine.name()))
            .spawn(move || {
                if let Err(e) = engine.run(&shutdown) {
                    error!(error = %e, "pulse engine exited with error");
                }
            })
            .map_err(|e| AxisError::Spawn(e.to_string()))?;

        self.workers.push(handle);
        Ok(())
    }

    /// Forward one command to an axis.
    pub fn apply(&self, axis: AxisId, command: AxisCommand) {
        self.shared(axis).apply(command);
    }

    /// Manual jog: flip an axis's direction bit. Returns the new direction.
    pub fn toggle_direction(&self, axis: AxisId) -> Direction {
        let direction = self.shared(axis).toggle_direction();
        info!(%axis, ?direction, "direction toggled");
        direction
    }

    /// Manual jog: flip an axis's enable bit. Returns the new logical state.
    pub fn toggle_enable(&self, axis: AxisId) -> bool {
        let enabled = self.shared(axis).toggle_enabled();
        info!(%axis, enabled, "enable toggled");
        enabled
    }

    /// Disable both axes without stopping the pulse threads.
    pub fn halt_all(&self) {
        self.x.apply(AxisCommand::Halt);
        self.y.apply(AxisCommand::Halt);
    }

    /// Force both axes disabled, stop the pulse threads, and join them.
    ///
    /// Idempotent; also runs on drop so every exit path fails closed.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.x.force_disable();
        self.y.force_disable();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("pulse thread panicked during shutdown");
            }
        }
    }
}

impl Drop for CommandDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
