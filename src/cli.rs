//! Command line interface

use anyhow::{Context, Result};
use clap::Parser;
use flux_physics::ColorTheme;
use flux_simulation::FieldConfiguration;
use std::fs;
use std::path::PathBuf;

const MIN_FPS: f32 = 1.0;
const MAX_FPS: f32 = 1000.0;

#[derive(Parser, Debug)]
#[command(name = "aether-flux", version, about = "Hand-driven particle field, headless driver")]
pub struct Cli {
    /// JSON settings file (camelCase keys, as written by the web front end)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Number of particles
    #[arg(long)]
    pub count: Option<usize>,

    /// Particle size
    #[arg(long)]
    pub size: Option<f32>,

    /// Hand interaction strength
    #[arg(long)]
    pub strength: Option<f32>,

    /// Idle flow speed
    #[arg(long)]
    pub idle_speed: Option<f32>,

    /// Color theme: cyber, sunset or nature
    #[arg(long)]
    pub theme: Option<ColorTheme>,

    /// Switch to the next theme every this many seconds of simulation time
    #[arg(long, value_name = "SECONDS")]
    pub theme_cycle: Option<f32>,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Target frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Sleep between frames to run at the target frame rate
    #[arg(long)]
    pub realtime: bool,

    /// Seed for anchor placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Viewport width used for hand projection
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Viewport height used for hand projection
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Settings file (or defaults) with command line overrides applied
    pub fn configuration(&self) -> Result<FieldConfiguration> {
        let mut config = match &self.settings {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing settings in {}", path.display()))?
            }
            None => FieldConfiguration::default(),
        };

        if let Some(count) = self.count {
            config.particle_count = count;
        }
        if let Some(size) = self.size {
            config.particle_size = size;
        }
        if let Some(strength) = self.strength {
            config.interaction_strength = strength;
        }
        if let Some(idle_speed) = self.idle_speed {
            config.idle_speed = idle_speed;
        }
        if let Some(theme) = self.theme {
            config.color_theme = theme;
        }

        config.validate().context("invalid settings")?;
        Ok(config)
    }

    /// Seconds per frame at the target rate, clamped to 1..=1000 fps
    pub fn frame_delta(&self) -> f32 {
        let fps = if self.fps.is_finite() && self.fps > 0.0 {
            self.fps.clamp(MIN_FPS, MAX_FPS)
        } else {
            60.0
        };
        1.0 / fps
    }
}
