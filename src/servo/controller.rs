//! Per-axis servo policy.
//!
//! Converts one [`Detection`] per frame into an [`AxisCommand`]: dead-zone
//! suppression, proportional speed scaling, and lost-target coasting.
//!
//! The law is purely proportional; there is no integral or derivative term,
//! so a steady-state offset equal to the dead-zone width is an accepted
//! limitation.

use std::time::Duration;

use crate::axis::{AxisCommand, AxisId, Direction};
use crate::config::{FrameConfig, ServoConfig};

use super::Detection;

/// Stateful per-axis controller.
///
/// X and Y are evaluated with fully independent controllers even though they
/// share one detection per frame.
#[derive(Debug, Clone)]
pub struct AxisServoController {
    axis: AxisId,
    center: i32,
    extent: u32,
    dead_zone: u32,
    base_period: Duration,
    gain: Duration,
    min_period: Duration,
    max_lost_frames: u32,

    /// Direction/period last commanded while the target was inside the servo
    /// band; `None` means there is no recent motion to replay.
    last: Option<(Direction, Duration)>,

    /// Consecutive frames without a usable detection for this axis.
    lost_frames: u32,
}

impl AxisServoController {
    /// Create a controller for one axis.
    ///
    /// `min_period` is the pulse engine's safety floor; the proportional law
    /// clamps to it because the computed period approaches zero (and below)
    /// as the offset grows.
    pub fn new(
        axis: AxisId,
        frame: &FrameConfig,
        servo: &ServoConfig,
        min_period: Duration,
    ) -> Self {
        Self {
            axis,
            center: frame.center(axis),
            extent: frame.extent(axis),
            dead_zone: servo.dead_zone_px,
            base_period: servo.base_period(),
            gain: servo.gain(),
            min_period,
            max_lost_frames: servo.max_lost_frames,
            last: None,
            lost_frames: 0,
        }
    }

    /// The axis this controller steers.
    #[inline]
    pub fn axis(&self) -> AxisId {
        self.axis
    }

    /// Consecutive lost frames so far. Never exceeds the configured budget.
    #[inline]
    pub fn lost_frames(&self) -> u32 {
        self.lost_frames
    }

    /// Decide the command for one frame.
    pub fn update(&mut self, detection: &Detection) -> AxisCommand {
        match detection.coordinate(self.axis) {
            Some(coordinate) => self.on_visible(coordinate - self.center),
            None => self.on_lost(),
        }
    }

    fn on_visible(&mut self, offset: i32) -> AxisCommand {
        self.lost_frames = 0;

        if offset.unsigned_abs() <= self.dead_zone {
            // Centered is a terminal "arrived" state, not "temporarily
            // lost": clearing the memory prevents coasting on a later loss.
            self.last = None;
            return AxisCommand::Halt;
        }

        let direction = Direction::from_offset(offset);
        let step_period = self.period_for(offset.unsigned_abs());
        self.last = Some((direction, step_period));

        AxisCommand::Drive {
            direction,
            step_period,
        }
    }

    /// Proportional period law: faster stepping the farther the target is
    /// from center, clamped to the safety floor.
    fn period_for(&self, magnitude: u32) -> Duration {
        let reduction = self.gain.as_nanos() as f64 * f64::from(magnitude) / f64::from(self.extent);
        let raw = self.base_period.as_nanos() as f64 - reduction;
        let floor = self.min_period.as_nanos() as f64;
        Duration::from_nanos(raw.max(floor) as u64)
    }

    fn on_lost(&mut self) -> AxisCommand {
        let Some((direction, step_period)) = self.last else {
            return AxisCommand::Halt;
        };

        if self.lost_frames < self.max_lost_frames {
            self.lost_frames += 1;
        }
        if self.lost_frames < self.max_lost_frames {
            // Dead-reckon through brief occlusion or detection noise.
            AxisCommand::Drive {
                direction,
                step_period,
            }
        } else {
            AxisCommand::Halt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FLOOR: Duration = Duration::from_micros(200);

    fn controller() -> AxisServoController {
        let frame = FrameConfig {
            width: 640,
            height: 360,
        };
        AxisServoController::new(AxisId::X, &frame, &ServoConfig::default(), FLOOR)
    }

    fn at_offset(offset: i32) -> Detection {
        Detection::Present {
            x: 320 + offset,
            y: 180,
            area: 2000.0,
        }
    }

    fn drive_period(cmd: AxisCommand) -> Duration {
        match cmd {
            AxisCommand::Drive { step_period, .. } => step_period,
            AxisCommand::Halt => panic!("expected Drive, got Halt"),
        }
    }

    #[test]
    fn inside_dead_zone_halts_and_clears_memory() {
        let mut servo = controller();
        servo.update(&at_offset(200));
        let cmd = servo.update(&at_offset(10));
        assert_eq!(cmd, AxisCommand::Halt);

        // Memory cleared: the next loss has nothing to replay.
        assert_eq!(servo.update(&Detection::Absent), AxisCommand::Halt);
    }

    #[test]
    fn dead_zone_boundary_is_inclusive() {
        let mut servo = controller();
        assert_eq!(servo.update(&at_offset(50)), AxisCommand::Halt);
        assert_eq!(servo.update(&at_offset(-50)), AxisCommand::Halt);
        assert!(servo.update(&at_offset(51)).is_drive());
    }

    #[test]
    fn direction_matches_offset_sign() {
        let mut servo = controller();
        match servo.update(&at_offset(120)) {
            AxisCommand::Drive { direction, .. } => assert_eq!(direction, Direction::Positive),
            cmd => panic!("unexpected {cmd:?}"),
        }
        match servo.update(&at_offset(-120)) {
            AxisCommand::Drive { direction, .. } => assert_eq!(direction, Direction::Negative),
            cmd => panic!("unexpected {cmd:?}"),
        }
    }

    #[test]
    fn period_shrinks_with_distance_down_to_floor() {
        let mut servo = controller();
        let near = drive_period(servo.update(&at_offset(60)));
        let far = drive_period(servo.update(&at_offset(200)));
        assert!(far < near);

        // A full-extent offset would compute a negative period; clamped.
        let extreme = drive_period(servo.update(&at_offset(320)));
        assert_eq!(extreme, FLOOR);
    }

    #[test]
    fn coasting_replays_last_command_for_budget_minus_one_frames() {
        let mut servo = controller();
        let original = servo.update(&at_offset(200));

        for frame in 1..10 {
            let cmd = servo.update(&Detection::Absent);
            assert_eq!(cmd, original, "frame {frame} should coast");
            assert_eq!(servo.lost_frames(), frame);
        }

        // Frame max_lost_frames: budget exhausted.
        assert_eq!(servo.update(&Detection::Absent), AxisCommand::Halt);
        assert_eq!(servo.lost_frames(), 10);

        // And it stays halted without exceeding the budget.
        assert_eq!(servo.update(&Detection::Absent), AxisCommand::Halt);
        assert_eq!(servo.lost_frames(), 10);
    }

    #[test]
    fn redetection_resets_lost_count_even_at_the_limit() {
        let mut servo = controller();
        servo.update(&at_offset(200));
        for _ in 0..10 {
            servo.update(&Detection::Absent);
        }
        assert_eq!(servo.lost_frames(), 10);

        let cmd = servo.update(&at_offset(150));
        assert!(cmd.is_drive());
        assert_eq!(servo.lost_frames(), 0);
    }

    #[test]
    fn loss_without_memory_halts_immediately() {
        let mut servo = controller();
        assert_eq!(servo.update(&Detection::Absent), AxisCommand::Halt);
        assert_eq!(servo.lost_frames(), 0);
    }

    #[test]
    fn zero_budget_disables_coasting() {
        let frame = FrameConfig {
            width: 640,
            height: 360,
        };
        let servo_cfg = ServoConfig {
            max_lost_frames: 0,
            ..ServoConfig::default()
        };
        let mut servo = AxisServoController::new(AxisId::X, &frame, &servo_cfg, FLOOR);
        servo.update(&at_offset(200));
        assert_eq!(servo.update(&Detection::Absent), AxisCommand::Halt);
    }

    #[test]
    fn y_axis_uses_vertical_coordinate_and_extent() {
        let frame = FrameConfig {
            width: 640,
            height: 360,
        };
        let mut servo =
            AxisServoController::new(AxisId::Y, &frame, &ServoConfig::default(), FLOOR);
        let cmd = servo.update(&Detection::Present {
            x: 320,
            y: 60,
            area: 2000.0,
        });
        match cmd {
            AxisCommand::Drive { direction, .. } => assert_eq!(direction, Direction::Negative),
            cmd => panic!("unexpected {cmd:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_direction_sign_and_floor(offset in -320i32..=320) {
            let mut servo = controller();
            let cmd = servo.update(&at_offset(offset));
            if offset.unsigned_abs() <= 50 {
                prop_assert_eq!(cmd, AxisCommand::Halt);
            } else {
                let AxisCommand::Drive { direction, step_period } = cmd else {
                    return Err(TestCaseError::fail("expected Drive"));
                };
                prop_assert_eq!(direction.sign(), offset.signum());
                prop_assert!(step_period >= FLOOR);
            }
        }

        #[test]
        fn prop_period_monotonically_non_increasing(a in 51u32..=320, b in 51u32..=320) {
            let (near, far) = (a.min(b), a.max(b));
            let mut servo = controller();
            let p_near = match servo.update(&at_offset(near as i32)) {
                AxisCommand::Drive { step_period, .. } => step_period,
                _ => return Err(TestCaseError::fail("expected Drive")),
            };
            let p_far = match servo.update(&at_offset(far as i32)) {
                AxisCommand::Drive { step_period, .. } => step_period,
                _ => return Err(TestCaseError::fail("expected Drive")),
            };
            prop_assert!(p_far <= p_near);
        }
    }
}
