//! Servo policy layer: detections, per-axis controllers, and the tracker.

mod controller;
mod detection;
mod tracker;

pub use controller::AxisServoController;
pub use detection::{Detection, TargetDetector};
pub use tracker::ServoTracker;
