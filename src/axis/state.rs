//! Shared per-axis command state between the decision and pulse domains.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::{AxisCommand, Direction};

/// Snapshot of one axis's commanded hardware state.
///
/// Written only by the decision domain, read only by the pulse domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisState {
    /// When false, no pulses are emitted.
    pub enabled: bool,
    /// Latched direction; takes effect on the next full pulse cycle.
    pub direction: Direction,
    /// Half-period between step edges.
    pub step_period: Duration,
}

impl AxisState {
    fn new(step_period: Duration) -> Self {
        // Safe defaults: disabled, fixed polarity. The motor must never be
        // live before the decision domain has made a first decision.
        Self {
            enabled: false,
            direction: Direction::Positive,
            step_period,
        }
    }
}

/// Cloneable handle to one axis's shared command state.
///
/// The whole `(enabled, direction, step_period)` triple lives behind a single
/// lock, so the pulse domain can never observe a half-updated pair.
#[derive(Clone)]
pub struct SharedAxis {
    inner: Arc<Mutex<AxisState>>,
    min_step_period: Duration,
}

impl SharedAxis {
    /// Create shared state with an initial period and a safety floor.
    ///
    /// An initial period below the floor is raised to the floor.
    pub fn new(initial_period: Duration, min_step_period: Duration) -> Self {
        let period = initial_period.max(min_step_period);
        Self {
            inner: Arc::new(Mutex::new(AxisState::new(period))),
            min_step_period,
        }
    }

    /// Apply one command from the decision domain.
    ///
    /// A `Drive` period below the safety floor is rejected: enable and
    /// direction still apply, but the previous valid period is retained.
    /// The servo law can compute near-zero periods as the offset approaches
    /// the dead-zone boundary, so this check is not optional.
    pub fn apply(&self, command: AxisCommand) {
        let mut state = self.inner.lock();
        match command {
            AxisCommand::Halt => state.enabled = false,
            AxisCommand::Drive {
                direction,
                step_period,
            } => {
                state.enabled = true;
                state.direction = direction;
                if step_period >= self.min_step_period {
                    state.step_period = step_period;
                }
            }
        }
    }

    /// Snapshot the triple for one pulse cycle.
    #[inline]
    pub fn snapshot(&self) -> AxisState {
        *self.inner.lock()
    }

    /// Force the axis disabled. Used on shutdown and on pulse faults.
    pub fn force_disable(&self) {
        self.inner.lock().enabled = false;
    }

    /// Flip the stored direction bit (manual jog). Returns the new direction.
    pub fn toggle_direction(&self) -> Direction {
        let mut state = self.inner.lock();
        state.direction = state.direction.toggled();
        state.direction
    }

    /// Flip the enable bit (manual jog). Returns the new logical state.
    pub fn toggle_enabled(&self) -> bool {
        let mut state = self.inner.lock();
        state.enabled = !state.enabled;
        state.enabled
    }

    /// The configured safety floor for the step period.
    #[inline]
    pub fn min_step_period(&self) -> Duration {
        self.min_step_period
    }
}
