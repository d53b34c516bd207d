//! Tuning constants for the particle field
//!
//! Velocities are per-frame displacements, so most of these are dimensionless
//! per-frame factors rather than physical rates.

/// Number of ghost segments trailing each head
pub const GHOST_COUNT: usize = 4;

/// Renderable points per particle (head + ghosts)
pub const POINTS_PER_PARTICLE: usize = 1 + GHOST_COUNT;

/// Opacity falloff per trail segment (segment `g` has `GHOST_OPACITY_DECAY^g`)
pub const GHOST_OPACITY_DECAY: f32 = 0.7;

/// Fraction of the gap each segment closes toward the one ahead of it per frame
pub const TRAIL_FOLLOW: f32 = 0.25;

/// Velocity retained after each frame
pub const DAMPING: f32 = 0.94;

/// Spring constant pulling heads back to their anchors
pub const RETURN_FORCE: f32 = 0.035;

/// Maximum distance at which a hand exerts force
pub const INTERACTION_RADIUS: f32 = 22.0;

/// Multiplier from the user-facing interaction strength to force magnitude
pub const INTERACTION_FORCE_SCALE: f32 = 10.0;

/// Attraction is weaker than repulsion
pub const PINCH_ATTRACT_SCALE: f32 = 0.75;

/// Temporal frequency of the idle flow field
pub const IDLE_TIME_FREQUENCY: f32 = 0.7;

/// Spatial frequency of the idle flow field
pub const IDLE_SPATIAL_FREQUENCY: f32 = 0.2;

/// Multiplier from the user-facing idle speed to drift amplitude
pub const IDLE_AMPLITUDE_SCALE: f32 = 0.1;

/// Longest frame gap the integrator accepts, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Half extents of the box anchors are spawned in
pub const SPAWN_HALF_WIDTH: f32 = 37.5;
pub const SPAWN_HALF_HEIGHT: f32 = 25.0;
pub const SPAWN_HALF_DEPTH: f32 = 4.0;

/// Multiplier from the user-facing particle size to the rendered point size
pub const POINT_SIZE_SCALE: f32 = 2.8;
