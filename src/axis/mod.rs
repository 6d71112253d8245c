//! Axis hardware layer: commands, shared state, outputs, and the pulse engine.

mod command;
mod delay;
mod engine;
mod pins;
mod state;

pub use command::{AxisCommand, AxisId, Direction};
pub use delay::SleepDelay;
pub use engine::StepPulseEngine;
pub use pins::AxisPins;
pub use state::{AxisState, SharedAxis};
