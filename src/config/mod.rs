//! Configuration structures and loading.
//!
//! Defines the TOML schema for frames, servo policy, and axes, along with
//! parsing and validation.

mod axis;
mod loader;
mod servo;
mod system;
mod validation;

pub use axis::AxisConfig;
pub use loader::{load_config, parse_config};
pub use servo::ServoConfig;
pub use system::{FrameConfig, SystemConfig};
pub use validation::validate_config;
