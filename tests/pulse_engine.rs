//! Live pulse-domain tests: engines on real threads behind the dispatcher.
//!
//! Timing assertions are deliberately loose; these tests check that pulses
//! flow, stop, and fail closed, not that the OS scheduler is precise.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{ErrorType, OutputPin};
use stepper_servo::{
    AxisCommand, AxisId, AxisPins, CommandDispatcher, Direction, SharedAxis, SleepDelay,
    StepPulseEngine,
};

/// Records every level written, for waveform inspection after the fact.
#[derive(Clone, Default)]
struct RecordingPin {
    writes: Arc<AtomicUsize>,
    level: Arc<AtomicBool>,
}

impl RecordingPin {
    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.store(false, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.store(true, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct LiveAxis {
    step: RecordingPin,
    enable: RecordingPin,
    shared: SharedAxis,
}

fn spawn_live_axis(dispatcher: &mut CommandDispatcher, axis: AxisId) -> LiveAxis {
    let step = RecordingPin::default();
    let dir = RecordingPin::default();
    let enable = RecordingPin::default();

    // Active-low enable, like the real drivers.
    let pins = AxisPins::new(step.clone(), dir, enable.clone(), false, true).unwrap();
    let shared = dispatcher.shared(axis).clone();
    let engine = StepPulseEngine::new(
        pins,
        SleepDelay,
        shared.clone(),
        axis.key(),
        Duration::from_millis(1),
    );
    dispatcher.spawn_engine(engine).unwrap();

    LiveAxis {
        step,
        enable,
        shared,
    }
}

fn dispatcher() -> CommandDispatcher {
    let floor = Duration::from_micros(100);
    let base = Duration::from_micros(500);
    CommandDispatcher::new(SharedAxis::new(base, floor), SharedAxis::new(base, floor))
}

#[test]
fn pulses_flow_when_driven_and_stop_on_halt() {
    let mut dispatcher = dispatcher();
    let axis = spawn_live_axis(&mut dispatcher, AxisId::X);

    // Disabled: the engine idles without touching the step output.
    thread::sleep(Duration::from_millis(20));
    assert_eq!(axis.step.writes(), 0);

    axis.shared.apply(AxisCommand::Drive {
        direction: Direction::Positive,
        step_period: Duration::from_micros(500),
    });
    thread::sleep(Duration::from_millis(50));
    let while_driven = axis.step.writes();
    assert!(
        while_driven >= 4,
        "expected step edges while driven, saw {while_driven}"
    );

    axis.shared.apply(AxisCommand::Halt);
    // Let the in-flight pulse cycle finish.
    thread::sleep(Duration::from_millis(20));
    let after_halt = axis.step.writes();
    thread::sleep(Duration::from_millis(30));
    assert!(
        axis.step.writes() <= after_halt + 2,
        "step output must be quiet after halt"
    );

    dispatcher.shutdown();
}

#[test]
fn shutdown_leaves_both_enable_outputs_off() {
    let mut dispatcher = dispatcher();
    let x = spawn_live_axis(&mut dispatcher, AxisId::X);
    let y = spawn_live_axis(&mut dispatcher, AxisId::Y);

    dispatcher.apply(
        AxisId::X,
        AxisCommand::Drive {
            direction: Direction::Negative,
            step_period: Duration::from_micros(500),
        },
    );
    dispatcher.apply(
        AxisId::Y,
        AxisCommand::Drive {
            direction: Direction::Positive,
            step_period: Duration::from_micros(500),
        },
    );
    thread::sleep(Duration::from_millis(20));

    dispatcher.shutdown();

    // Active-low enable: disabled is physical high; shared state agrees.
    assert!(x.enable.level(), "x enable output must be off");
    assert!(y.enable.level(), "y enable output must be off");
    assert!(!x.shared.snapshot().enabled);
    assert!(!y.shared.snapshot().enabled);
}

#[test]
fn direction_polarity_reaches_the_pin() {
    let mut dispatcher = dispatcher();

    let step = RecordingPin::default();
    let dir = RecordingPin::default();
    let enable = RecordingPin::default();
    let pins = AxisPins::new(step, dir.clone(), enable, false, true).unwrap();
    let engine = StepPulseEngine::new(
        pins,
        SleepDelay,
        dispatcher.shared(AxisId::X).clone(),
        "x",
        Duration::from_millis(1),
    );
    dispatcher.spawn_engine(engine).unwrap();

    dispatcher.apply(
        AxisId::X,
        AxisCommand::Drive {
            direction: Direction::Negative,
            step_period: Duration::from_micros(500),
        },
    );
    thread::sleep(Duration::from_millis(20));
    assert!(!dir.level(), "negative direction is the low level");

    dispatcher.apply(
        AxisId::X,
        AxisCommand::Drive {
            direction: Direction::Positive,
            step_period: Duration::from_micros(500),
        },
    );
    thread::sleep(Duration::from_millis(20));
    assert!(dir.level(), "positive direction is the high level");

    dispatcher.shutdown();
}
