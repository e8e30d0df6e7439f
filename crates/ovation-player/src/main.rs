//! Ovation Player - headless driver for the celebration engine
//!
//! Fires one celebration and pumps frames until the engine winds itself
//! back to idle. Time is simulated at a fixed step by default so runs are
//! deterministic; `--realtime` paces frames against the wall clock instead.
//!
//! Usage:
//!   ovation-player [--width 800] [--height 600] [--snapshot out.png]

use anyhow::{Context, Result};
use clap::Parser;
use ovation_core::Viewport;
use ovation_engine::{CelebrationTrigger, EngineProfile, MotionPreference};
use ovation_render::CanvasSurface;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "ovation-player")]
#[command(about = "Run one celebration headless and report what happened")]
#[command(version)]
struct Args {
    /// Viewport width in logical pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height in logical pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Device pixel ratio (the surface caps it at 2)
    #[arg(long, default_value_t = 1.0)]
    dpr: f32,

    /// Frame rate of the pump
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// RNG seed
    #[arg(long, default_value_t = 0x5EED)]
    seed: u32,

    /// TOML profile overriding engine defaults
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Write the brightest frame to this PNG
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Pace frames against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,

    /// Honor a reduced-motion preference (the celebration becomes a no-op)
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let profile = match &args.profile {
        Some(path) => EngineProfile::load(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => EngineProfile::default(),
    };

    let preference = if args.reduced_motion {
        MotionPreference::Reduce
    } else {
        MotionPreference::NoPreference
    };
    let viewport = Viewport::new(args.width, args.height);
    let mut trigger = CelebrationTrigger::new(preference, profile, viewport, args.dpr, args.seed);

    trigger.fire(0.0);
    if !trigger.is_running() {
        println!("[player] reduced motion preference active, nothing to animate");
        return Ok(());
    }

    let fps = args.fps.max(1.0);
    let step = 1.0 / fps;
    let period = Duration::from_secs_f64(step);
    let started = Instant::now();

    let mut brightest: Option<(f32, CanvasSurface)> = None;
    let mut frames = 0u64;
    let mut peak_particles = 0usize;

    loop {
        let now = if args.realtime {
            started.elapsed().as_secs_f64()
        } else {
            frames as f64 * step
        };
        let running = trigger.frame(now);
        frames += 1;
        peak_particles = peak_particles.max(trigger.particle_count());

        if args.snapshot.is_some() {
            if let Some(surface) = trigger.surface() {
                let coverage = surface.max_coverage();
                if brightest.as_ref().map_or(true, |(best, _)| coverage > *best) {
                    brightest = Some((coverage, surface.clone()));
                }
            }
        }

        if frames % 30 == 0 {
            println!(
                "[player] t={now:.2}s particles={} pending_bursts={}",
                trigger.particle_count(),
                trigger.pending_bursts()
            );
        }

        if !running {
            break;
        }
        if args.realtime {
            std::thread::sleep(period);
        }
    }

    println!("[player] celebration finished after {frames} frames (peak {peak_particles} particles)");

    if let Some(path) = &args.snapshot {
        if let Some((coverage, surface)) = &brightest {
            ovation_render::write_png(surface, path)
                .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
            println!(
                "[player] snapshot written to {} (peak coverage {coverage:.2})",
                path.display()
            );
        }
    }

    Ok(())
}
