//! Axis identifiers, directions, and motion commands.

use core::fmt;
use std::time::Duration;

/// One controlled degree of freedom and its frame coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// Horizontal axis (frame x / pan).
    X,
    /// Vertical axis (frame y / tilt).
    Y,
}

impl AxisId {
    /// Configuration key and log label for this axis.
    #[inline]
    pub fn key(self) -> &'static str {
        match self {
            AxisId::X => "x",
            AxisId::Y => "y",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Direction of motor motion along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward increasing pixel coordinate.
    Positive,
    /// Toward decreasing pixel coordinate.
    Negative,
}

impl Direction {
    /// Get direction from a signed pixel offset.
    #[inline]
    pub fn from_offset(offset: i32) -> Self {
        if offset >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// A per-decision command for one axis.
///
/// Each decision overwrites the previous one; commands are never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisCommand {
    /// Run the axis with the given direction and half-period.
    Drive {
        /// Direction to step in.
        direction: Direction,
        /// Half-period between step edges.
        step_period: Duration,
    },
    /// Disable the axis; the pulse engine idles.
    Halt,
}

impl AxisCommand {
    /// Whether this command keeps the axis running.
    #[inline]
    pub fn is_drive(&self) -> bool {
        matches!(self, AxisCommand::Drive { .. })
    }
}
