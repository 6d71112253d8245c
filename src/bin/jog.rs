//! Manual keyboard jog mode.
//!
//! Toggles direction and enable per axis from raw-mode key presses:
//! q/w flip X/Y direction, a/s flip X/Y enable, Esc or Ctrl-C exits.
//! The terminal and both motors are restored/disabled on every exit path.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stepper_servo::{
    gpio, AxisId, AxisPins, CommandDispatcher, JogEvent, KeyboardJogSource, SharedAxis,
    SleepDelay, StepPulseEngine, SystemConfig,
};

/// Jog a dual-axis stepper mount from the keyboard
#[derive(Parser, Debug)]
#[command(name = "jog")]
#[command(version)]
#[command(about = "Manual keyboard jog control for a dual-axis stepper mount")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "servo.toml")]
    config: PathBuf,
}

fn spawn_axis(
    dispatcher: &mut CommandDispatcher,
    config: &SystemConfig,
    axis: AxisId,
) -> Result<()> {
    let axis_config = config
        .hardware_axis(axis)
        .with_context(|| format!("axis '{axis}' missing from configuration"))?;

    let (step, dir, enable) = gpio::open_axis(axis_config)
        .with_context(|| format!("acquiring GPIO lines for axis '{axis}'"))?;
    let pins = AxisPins::new(
        step,
        dir,
        enable,
        axis_config.invert_direction,
        axis_config.invert_enable,
    )
    .with_context(|| format!("initializing outputs for axis '{axis}'"))?;

    let engine = StepPulseEngine::new(
        pins,
        SleepDelay,
        dispatcher.shared(axis).clone(),
        &axis_config.name,
        axis_config.idle_poll(),
    );
    dispatcher.spawn_engine(engine)?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = stepper_servo::load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let shared_for = |axis: AxisId| -> Result<SharedAxis> {
        let axis_config = config
            .hardware_axis(axis)
            .with_context(|| format!("axis '{axis}' missing from configuration"))?;
        Ok(SharedAxis::new(
            config.servo.base_period(),
            axis_config.min_step_period(),
        ))
    };

    let mut dispatcher = CommandDispatcher::new(shared_for(AxisId::X)?, shared_for(AxisId::Y)?);
    spawn_axis(&mut dispatcher, &config, AxisId::X)?;
    spawn_axis(&mut dispatcher, &config, AxisId::Y)?;

    println!("Controls:");
    println!("  q = toggle X direction    w = toggle Y direction");
    println!("  a = toggle X on/off       s = toggle Y on/off");
    println!("  Esc or Ctrl-C = exit");

    // Raw mode is restored when the source drops, on every exit path.
    let mut source = KeyboardJogSource::new().context("entering raw mode")?;

    loop {
        match source.next_event(Duration::from_millis(100))? {
            Some(JogEvent::ToggleDirection(axis)) => {
                dispatcher.toggle_direction(axis);
            }
            Some(JogEvent::ToggleEnable(axis)) => {
                dispatcher.toggle_enable(axis);
            }
            Some(JogEvent::Quit) => break,
            None => {}
        }
    }

    drop(source);
    dispatcher.shutdown();
    info!("motors disabled, exiting");
    Ok(())
}
