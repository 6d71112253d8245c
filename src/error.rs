//! Error types for stepper-servo.
//!
//! Provides unified error handling across configuration, axis hardware
//! access, and terminal input.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-servo operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis hardware (GPIO) error
    Axis(AxisError),
    /// Keyboard/terminal input error
    Input(InputError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(String),
    /// Axis name not found in configuration
    AxisNotFound(String),
    /// Invalid frame dimensions (must be > 0)
    InvalidFrameSize {
        /// Configured frame width in pixels
        width: u32,
        /// Configured frame height in pixels
        height: u32,
    },
    /// Dead zone must fit inside half of each frame extent
    InvalidDeadZone {
        /// Configured dead zone in pixels
        dead_zone: u32,
        /// Frame extent the dead zone exceeded
        extent: u32,
    },
    /// Step period floor must be positive and no larger than the base period
    InvalidStepPeriodFloor {
        /// Configured floor in microseconds
        min_us: u64,
        /// Servo base period in microseconds
        base_us: u64,
    },
    /// The same GPIO line is used for more than one output of an axis
    DuplicateGpioLine {
        /// Axis name
        axis: String,
        /// Offending line offset
        line: u32,
    },
    /// Minimum blob area must be >= 0
    InvalidMinArea(f64),
    /// File I/O error
    IoError(String),
}

/// Axis hardware errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisError {
    /// Writing a pin level failed; names the output ("step", "dir", "enable")
    PinWrite(&'static str),
    /// Opening the GPIO chip failed
    ChipOpen {
        /// Chip path or name
        chip: String,
        /// Underlying error text
        message: String,
    },
    /// Requesting a GPIO line as output failed
    LineRequest {
        /// Line offset on the chip
        line: u32,
        /// Underlying error text
        message: String,
    },
    /// Spawning a pulse thread failed
    Spawn(String),
}

/// Terminal input errors.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Enabling or restoring terminal raw mode failed
    RawMode(String),
    /// Reading a key event failed
    ReadEvent(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Input(e) => write!(f, "Input error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::InvalidFrameSize { width, height } => {
                write!(
                    f,
                    "Invalid frame size {}x{}. Both dimensions must be > 0",
                    width, height
                )
            }
            ConfigError::InvalidDeadZone { dead_zone, extent } => {
                write!(
                    f,
                    "Dead zone of {} px does not fit inside half the frame extent of {} px",
                    dead_zone, extent
                )
            }
            ConfigError::InvalidStepPeriodFloor { min_us, base_us } => {
                write!(
                    f,
                    "Step period floor {} us must be > 0 and <= base period {} us",
                    min_us, base_us
                )
            }
            ConfigError::DuplicateGpioLine { axis, line } => {
                write!(f, "Axis '{}' uses GPIO line {} more than once", axis, line)
            }
            ConfigError::InvalidMinArea(v) => {
                write!(f, "Invalid minimum area: {}. Must be >= 0", v)
            }
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::PinWrite(pin) => write!(f, "Writing the {} output failed", pin),
            AxisError::ChipOpen { chip, message } => {
                write!(f, "Opening GPIO chip '{}' failed: {}", chip, message)
            }
            AxisError::LineRequest { line, message } => {
                write!(f, "Requesting GPIO line {} as output failed: {}", line, message)
            }
            AxisError::Spawn(msg) => write!(f, "Spawning pulse thread failed: {}", msg),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::RawMode(msg) => write!(f, "Terminal raw mode: {}", msg),
            InputError::ReadEvent(msg) => write!(f, "Reading key event: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Error::Input(e)
    }
}

impl std::error::Error for Error {}

impl std::error::Error for ConfigError {}

impl std::error::Error for AxisError {}

impl std::error::Error for InputError {}
