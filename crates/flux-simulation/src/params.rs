//! Field configuration for runtime tuning

use crate::error::{FieldError, Result};
use flux_physics::{ColorTheme, POINT_SIZE_SCALE};
use serde::{Deserialize, Serialize};

/// Upper bound on the particle count accepted at the configuration boundary
pub const MAX_PARTICLE_COUNT: usize = 100_000;

/// User-facing settings snapshot
///
/// Serialized with camelCase keys so settings files written for the web
/// front end load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfiguration {
    pub particle_count: usize,
    pub particle_size: f32,
    pub interaction_strength: f32,
    pub idle_speed: f32,
    pub color_theme: ColorTheme,
}

impl Default for FieldConfiguration {
    fn default() -> Self {
        Self {
            particle_count: 2500,
            particle_size: 0.15,
            interaction_strength: 1.5,
            idle_speed: 0.5,
            color_theme: ColorTheme::Cyber,
        }
    }
}

impl FieldConfiguration {
    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(FieldError::TooManyParticles {
                requested: self.particle_count,
                max: MAX_PARTICLE_COUNT,
            });
        }

        for (field, value) in [
            ("particle_size", self.particle_size),
            ("interaction_strength", self.interaction_strength),
            ("idle_speed", self.idle_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FieldError::InvalidConfiguration { field, value });
            }
        }

        Ok(())
    }

    /// Size the renderer should draw points at
    pub fn point_size(&self) -> f32 {
        self.particle_size * POINT_SIZE_SCALE
    }
}
