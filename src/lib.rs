//! # stepper-servo
//!
//! Visual-servo and keyboard jog control for dual-axis stepper mounts with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Independent pulse domains**: one free-running pulse engine per axis,
//!   decoupled from the slower decision loop
//! - **Proportional servo policy**: dead-zone suppression, offset-scaled
//!   step periods, and bounded lost-target coasting
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE, `DelayNs` for
//!   pulse timing, with a `gpiod` adapter for Linux hosts
//! - **Configuration-driven**: frame geometry, servo gains, and GPIO lines
//!   in a TOML file
//! - **Fail-closed shutdown**: both axes are force-disabled on every exit
//!   path
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_servo::{
//!     AxisId, AxisPins, CommandDispatcher, ServoTracker, SharedAxis,
//!     SleepDelay, StepPulseEngine,
//! };
//!
//! // Load configuration from TOML
//! let config = stepper_servo::load_config("servo.toml")?;
//! let x_cfg = config.axis("x").unwrap();
//!
//! // Shared state: written by the decision loop, read by the pulse thread
//! let x_shared = SharedAxis::new(config.servo.base_period(), x_cfg.min_step_period());
//!
//! // Pulse engine over embedded-hal pins
//! let (step, dir, enable) = stepper_servo::gpio::open_axis(x_cfg)?;
//! let pins = AxisPins::new(step, dir, enable, x_cfg.invert_direction, x_cfg.invert_enable)?;
//! let engine = StepPulseEngine::new(
//!     pins, SleepDelay, x_shared.clone(), &x_cfg.name, x_cfg.idle_poll(),
//! );
//!
//! // Dispatcher owns the pulse threads and the shutdown path
//! let mut dispatcher = CommandDispatcher::new(x_shared, y_shared);
//! dispatcher.spawn_engine(engine)?;
//!
//! // Servo mode: one decision per detector frame
//! let mut tracker = ServoTracker::from_config(&config)?;
//! tracker.track(&detection, &dispatcher);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod axis;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gpio;
pub mod jog;
pub mod servo;

// Re-exports for ergonomic API
pub use axis::{AxisCommand, AxisId, AxisPins, AxisState, Direction, SharedAxis, SleepDelay, StepPulseEngine};
pub use config::{load_config, parse_config, validate_config, AxisConfig, ServoConfig, SystemConfig};
pub use dispatch::CommandDispatcher;
pub use error::{Error, Result};
pub use jog::{JogEvent, KeyboardJogSource, RawModeGuard};
pub use servo::{AxisServoController, Detection, ServoTracker, TargetDetector};
