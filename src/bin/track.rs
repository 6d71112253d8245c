//! Visual-servo tracking mode.
//!
//! Reads raw BGR24 frames from stdin (e.g. piped from `libcamera-vid |
//! ffmpeg -f rawvideo -pix_fmt bgr24 -`), detects the target, and drives
//! both axes toward it. Ctrl-C or end of the frame stream shuts down
//! cleanly with both motors disabled.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stepper_servo::{
    gpio, AxisId, AxisPins, CommandDispatcher, Detection, ServoTracker, SharedAxis, SleepDelay,
    StepPulseEngine, SystemConfig, TargetDetector,
};

/// Track a colored target with a dual-axis stepper mount
#[derive(Parser, Debug)]
#[command(name = "track")]
#[command(version)]
#[command(about = "Visual-servo tracking: raw BGR24 frames on stdin, motors on GPIO")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "servo.toml")]
    config: PathBuf,
}

/// Red-dominance moment detector over raw BGR24 frames.
///
/// A pixel counts when its red channel clearly dominates green and blue;
/// the centroid is the first moment of the counted pixels. Deliberately
/// minimal: anything fancier belongs behind the `TargetDetector` seam.
struct RedMomentDetector {
    width: u32,
    height: u32,
    min_area: f64,
}

impl TargetDetector for RedMomentDetector {
    fn detect(&mut self, frame: &[u8]) -> Detection {
        let mut m00 = 0.0f64;
        let mut m10 = 0.0f64;
        let mut m01 = 0.0f64;

        for y in 0..self.height {
            let row = (y * self.width * 3) as usize;
            for x in 0..self.width {
                let i = row + (x * 3) as usize;
                let (b, g, r) = (frame[i], frame[i + 1], frame[i + 2]);
                if r > 120 && r > g.saturating_add(40) && r > b.saturating_add(40) {
                    m00 += 1.0;
                    m10 += f64::from(x);
                    m01 += f64::from(y);
                }
            }
        }

        if m00 > self.min_area {
            Detection::Present {
                x: (m10 / m00) as i32,
                y: (m01 / m00) as i32,
                area: m00,
            }
        } else {
            Detection::Absent
        }
    }
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

/// Read one frame. `Ok(false)` means the stream ended.
fn read_frame(stdin: &mut impl Read, buffer: &mut [u8]) -> io::Result<bool> {
    match stdin.read_exact(buffer) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
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

    let shutdown = dispatcher.shutdown_flag();
    ctrlc::set_handler(move || {
        info!("received shutdown signal");
        shutdown.store(true, Ordering::SeqCst);
    })
    .context("installing signal handler")?;

    let mut tracker = ServoTracker::from_config(&config)?;
    let mut detector = RedMomentDetector {
        width: config.frame.width,
        height: config.frame.height,
        min_area: config.servo.min_area,
    };

    info!(
        width = config.frame.width,
        height = config.frame.height,
        "tracking started, reading frames from stdin"
    );

    let shutdown = dispatcher.shutdown_flag();
    let mut stdin = io::stdin().lock();
    let mut buffer = vec![0u8; config.frame.frame_bytes()];

    while !shutdown.load(Ordering::SeqCst) {
        match read_frame(&mut stdin, &mut buffer) {
            Ok(true) => {
                let detection = detector.detect(&buffer);
                tracker.track(&detection, &dispatcher);
            }
            Ok(false) => {
                info!("frame stream ended");
                break;
            }
            Err(e) => {
                // A bad frame is one lost detection, not a fatal error.
                warn!(error = %e, "frame read failed");
                tracker.track(&Detection::Absent, &dispatcher);
            }
        }
    }

    dispatcher.shutdown();
    info!("motors disabled, exiting");
    Ok(())
}
