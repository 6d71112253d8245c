//! Per-frame detection results and the detector seam.

use crate::axis::AxisId;

/// Result of running the target detector over one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    /// No target in this frame (or the blob was below the area threshold).
    Absent,
    /// Target centroid and blob area.
    Present {
        /// Centroid x coordinate in pixels.
        x: i32,
        /// Centroid y coordinate in pixels.
        y: i32,
        /// Blob area (zeroth image moment).
        area: f64,
    },
}

impl Detection {
    /// Whether a target was found.
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Detection::Present { .. })
    }

    /// The centroid coordinate along one axis, if found.
    #[inline]
    pub fn coordinate(&self, axis: AxisId) -> Option<i32> {
        match *self {
            Detection::Absent => None,
            Detection::Present { x, y, .. } => Some(match axis {
                AxisId::X => x,
                AxisId::Y => y,
            }),
        }
    }
}

/// Produces one [`Detection`] per video frame.
///
/// Implementations must be pure per frame and must not retain frame data
/// after returning; detection latency directly bounds the decision-domain
/// cadence.
pub trait TargetDetector {
    /// Detect the target in a raw frame.
    fn detect(&mut self, frame: &[u8]) -> Detection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_has_no_coordinates() {
        assert!(!Detection::Absent.is_present());
        assert_eq!(Detection::Absent.coordinate(AxisId::X), None);
        assert_eq!(Detection::Absent.coordinate(AxisId::Y), None);
    }

    #[test]
    fn present_selects_per_axis_coordinate() {
        let detection = Detection::Present {
            x: 440,
            y: 180,
            area: 2000.0,
        };
        assert_eq!(detection.coordinate(AxisId::X), Some(440));
        assert_eq!(detection.coordinate(AxisId::Y), Some(180));
    }
}
