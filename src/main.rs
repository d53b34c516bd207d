//! Aether Flux
//!
//! Headless driver for the hand-driven particle field. Runs the field against
//! the scripted hand source and logs what a renderer would be handed.

mod app;
mod cli;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::Cli;
use flux_renderer::Camera;
use flux_simulation::ParticleField;
use flux_tracking::{spawn_hand_source, ScriptedHandSource};
use std::thread;
use std::time::{Duration, Instant};

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        Some(log::LevelFilter::Error)
    } else {
        match cli.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    };

    // RUST_LOG applies unless a flag overrides it
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = cli.configuration()?;
    log::info!(
        "Starting particle field: {} particles, theme {}",
        config.particle_count,
        config.color_theme
    );

    let field = match cli.seed {
        Some(seed) => ParticleField::with_seed(config, seed)?,
        None => ParticleField::new(config)?,
    };
    let camera = Camera::new(cli.width, cli.height);
    let tracker = spawn_hand_source(ScriptedHandSource::default());
    let mut app = App::new(field, camera, tracker, cli.theme_cycle);

    let delta = cli.frame_delta();
    let frame_budget = Duration::from_secs_f32(delta);
    let log_every = ((1.0 / delta).round() as u64).max(1);
    let started = Instant::now();

    for _ in 0..cli.frames {
        let frame_start = Instant::now();
        let stats = app.frame(delta)?;

        if app.frame_counter() % log_every == 0 {
            let avg = app.average_frame_time();
            log::info!(
                "frame {} | {:.1} fps | hands: {} | mean displacement: {:.3}",
                app.frame_counter(),
                if avg > 0.0 { 1000.0 / avg } else { 0.0 },
                stats.hands,
                stats.mean_displacement
            );
        }

        if cli.realtime {
            if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    log::info!(
        "Simulated {} frames ({:.2}s of field time) in {:.2?}",
        app.frame_counter(),
        app.field().time(),
        started.elapsed()
    );
    Ok(())
}
