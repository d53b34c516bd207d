//! CPU particle field
//!
//! Particle state is kept in parallel arrays. Per-point buffers (positions,
//! colors, opacities) hold `count * POINTS_PER_PARTICLE` entries laid out as
//! `particle * POINTS_PER_PARTICLE + segment`, which is exactly what the
//! renderer uploads. Per-particle arrays (anchors, velocities) hold `count`.

use crate::error::{FieldError, Result};
use crate::params::FieldConfiguration;
use flux_physics::{
    elastic_return, ghost_opacity, idle_drift, point_index, propagate_trail, total_hand_force,
    ColorTheme, HandInput, DAMPING, MAX_FRAME_DELTA, POINTS_PER_PARTICLE, SPAWN_HALF_DEPTH,
    SPAWN_HALF_HEIGHT, SPAWN_HALF_WIDTH,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Which render buffers changed since the renderer last looked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferChanges {
    pub positions: bool,
    pub colors: bool,
    pub opacities: bool,
}

impl BufferChanges {
    pub const ALL: BufferChanges = BufferChanges {
        positions: true,
        colors: true,
        opacities: true,
    };

    /// True if the frame needs to be redrawn
    pub fn any(&self) -> bool {
        self.positions || self.colors || self.opacities
    }
}

/// Read-only inputs shared by every particle in one step
#[derive(Clone, Copy)]
struct StepInputs<'a> {
    time: f32,
    idle_speed: f32,
    interaction_strength: f32,
    hands: &'a [HandInput],
}

pub struct ParticleField {
    // Per point
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    opacities: Vec<f32>,

    // Per particle
    anchors: Vec<Vec3>,
    velocities: Vec<Vec3>,

    applied: FieldConfiguration,
    point_size: f32,
    time: f32,
    rng: StdRng,
    changes: BufferChanges,
}

impl ParticleField {
    /// Field with randomly placed anchors
    pub fn new(config: FieldConfiguration) -> Result<Self> {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Field whose anchor placement is reproducible from `seed`
    pub fn with_seed(config: FieldConfiguration, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Field with explicit anchors; `config.particle_count` must match
    pub fn from_anchors(config: FieldConfiguration, anchors: Vec<Vec3>) -> Result<Self> {
        config.validate()?;
        if anchors.len() != config.particle_count {
            return Err(FieldError::AnchorCountMismatch {
                anchors: anchors.len(),
                configured: config.particle_count,
            });
        }

        let mut field = Self::empty(config, StdRng::from_rng(&mut rand::rng()));
        field.populate(anchors);
        Ok(field)
    }

    fn with_rng(config: FieldConfiguration, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let mut field = Self::empty(config, rng);
        let anchors = field.random_anchors(config.particle_count);
        field.populate(anchors);
        log::info!(
            "Initialized particle field: {} particles, {} points",
            field.count(),
            field.point_count()
        );
        Ok(field)
    }

    fn empty(config: FieldConfiguration, rng: StdRng) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            opacities: Vec::new(),
            anchors: Vec::new(),
            velocities: Vec::new(),
            applied: config,
            point_size: config.point_size(),
            time: 0.0,
            rng,
            changes: BufferChanges::ALL,
        }
    }

    fn random_anchors(&mut self, count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|_| {
                Vec3::new(
                    self.rng.random_range(-SPAWN_HALF_WIDTH..SPAWN_HALF_WIDTH),
                    self.rng.random_range(-SPAWN_HALF_HEIGHT..SPAWN_HALF_HEIGHT),
                    self.rng.random_range(-SPAWN_HALF_DEPTH..SPAWN_HALF_DEPTH),
                )
            })
            .collect()
    }

    /// Replace all per-particle and per-point state
    ///
    /// Trails collapse onto their anchors, velocities are zeroed and colors
    /// come from the currently applied theme.
    fn populate(&mut self, anchors: Vec<Vec3>) {
        let count = anchors.len();
        let points = count * POINTS_PER_PARTICLE;
        let theme = self.applied.color_theme;

        self.positions = Vec::with_capacity(points);
        self.colors = Vec::with_capacity(points);
        self.opacities = Vec::with_capacity(points);

        for (i, anchor) in anchors.iter().enumerate() {
            let color = theme.particle_color(i, count);
            for segment in 0..POINTS_PER_PARTICLE {
                self.positions.push(anchor.to_array());
                self.colors.push(color);
                self.opacities.push(ghost_opacity(segment));
            }
        }

        self.velocities = vec![Vec3::ZERO; count];
        self.anchors = anchors;
        self.changes = BufferChanges::ALL;
    }

    fn recolor(&mut self, theme: ColorTheme) {
        let count = self.count();
        for (i, trail) in self.colors.chunks_exact_mut(POINTS_PER_PARTICLE).enumerate() {
            trail.fill(theme.particle_color(i, count));
        }
        self.changes.colors = true;
        log::debug!("Recolored {} particles with the {theme} theme", count);
    }

    /// Apply a settings snapshot
    ///
    /// A count change reallocates everything, a theme change recolors in
    /// place, and the point size is always refreshed. The snapshot is
    /// validated first; an invalid one leaves the field untouched.
    pub fn apply_configuration(&mut self, config: &FieldConfiguration) -> Result<()> {
        config.validate()?;

        if config.particle_count != self.count() {
            log::info!(
                "Resizing particle field: {} -> {} particles",
                self.count(),
                config.particle_count
            );
            let anchors = self.random_anchors(config.particle_count);
            self.populate(anchors);
        }

        if config.color_theme != self.applied.color_theme {
            self.recolor(config.color_theme);
        }

        self.point_size = config.point_size();
        self.applied = *config;
        Ok(())
    }

    /// Advance the simulation by one frame using the applied configuration
    ///
    /// `delta` is wall time since the previous frame; it is clamped to
    /// [`MAX_FRAME_DELTA`] and only drives the idle flow phase. Velocities are
    /// per-frame displacements, so heads advance by one velocity per call.
    pub fn update(&mut self, hands: &[HandInput], delta: f32) {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.time += delta;

        if self.anchors.is_empty() {
            return;
        }

        let inputs = StepInputs {
            time: self.time,
            idle_speed: self.applied.idle_speed,
            interaction_strength: self.applied.interaction_strength,
            hands,
        };
        integrate(
            &mut self.positions,
            &mut self.velocities,
            &self.anchors,
            &inputs,
        );
        self.changes.positions = true;
    }

    /// Apply `config` and advance one frame, as a single step boundary
    pub fn step(
        &mut self,
        config: &FieldConfiguration,
        hands: &[HandInput],
        delta: f32,
    ) -> Result<()> {
        self.apply_configuration(config)?;
        self.update(hands, delta);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.anchors.len()
    }

    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    pub fn anchors(&self) -> &[Vec3] {
        &self.anchors
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn head_position(&self, particle: usize) -> Vec3 {
        Vec3::from_array(self.positions[point_index(particle, 0)])
    }

    /// Head followed by its ghosts
    pub fn trail(&self, particle: usize) -> &[[f32; 3]] {
        let start = point_index(particle, 0);
        &self.positions[start..start + POINTS_PER_PARTICLE]
    }

    /// Cumulative simulation time
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn configuration(&self) -> &FieldConfiguration {
        &self.applied
    }

    pub fn changes(&self) -> BufferChanges {
        self.changes
    }

    /// Hand the pending buffer changes to the renderer and clear them
    pub fn take_changes(&mut self) -> BufferChanges {
        std::mem::take(&mut self.changes)
    }
}

/// One frame of dynamics for a single particle
///
/// Forces are evaluated at the head's position from the previous frame. The
/// trail follows before the head moves, so the first ghost lags by a frame.
fn integrate_particle(
    trail: &mut [[f32; 3]],
    velocity: &mut Vec3,
    anchor: Vec3,
    inputs: &StepInputs,
) {
    let head = Vec3::from_array(trail[0]);

    let mut v = *velocity;
    v += idle_drift(head, inputs.time, inputs.idle_speed);
    v += total_hand_force(head, inputs.hands, inputs.interaction_strength);
    v += elastic_return(anchor, head);
    v *= DAMPING;

    propagate_trail(trail);
    trail[0] = (head + v).to_array();
    *velocity = v;
}

#[cfg(not(feature = "parallel"))]
fn integrate(
    positions: &mut [[f32; 3]],
    velocities: &mut [Vec3],
    anchors: &[Vec3],
    inputs: &StepInputs,
) {
    integrate_serial(positions, velocities, anchors, inputs);
}

/// Below this many particles the rayon split costs more than it saves
#[cfg(feature = "parallel")]
const PARALLEL_MIN_PARTICLES: usize = 1024;

#[cfg(feature = "parallel")]
fn integrate(
    positions: &mut [[f32; 3]],
    velocities: &mut [Vec3],
    anchors: &[Vec3],
    inputs: &StepInputs,
) {
    if anchors.len() < PARALLEL_MIN_PARTICLES {
        integrate_serial(positions, velocities, anchors, inputs);
    } else {
        integrate_parallel(positions, velocities, anchors, inputs);
    }
}

fn integrate_serial(
    positions: &mut [[f32; 3]],
    velocities: &mut [Vec3],
    anchors: &[Vec3],
    inputs: &StepInputs,
) {
    positions
        .chunks_exact_mut(POINTS_PER_PARTICLE)
        .zip(velocities.iter_mut())
        .zip(anchors.iter())
        .for_each(|((trail, velocity), anchor)| {
            integrate_particle(trail, velocity, *anchor, inputs)
        });
}

#[cfg(feature = "parallel")]
fn integrate_parallel(
    positions: &mut [[f32; 3]],
    velocities: &mut [Vec3],
    anchors: &[Vec3],
    inputs: &StepInputs,
) {
    positions
        .par_chunks_exact_mut(POINTS_PER_PARTICLE)
        .zip(velocities.par_iter_mut())
        .zip(anchors.par_iter())
        .for_each(|((trail, velocity), anchor)| {
            integrate_particle(trail, velocity, *anchor, inputs)
        });
}
