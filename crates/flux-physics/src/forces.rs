//! Per-particle force laws
//!
//! Every function returns a velocity delta for a single particle. Particles
//! never interact with each other, so these are all pure functions of the
//! particle's own state plus shared, read-only inputs.

use crate::constants::*;
use crate::hand::{Gesture, HandInput};
use glam::Vec3;

/// Idle flow field
///
/// A deterministic spatial-phase oscillation: x velocity is driven by the
/// particle's height and y velocity by its horizontal position. No z term.
pub fn idle_drift(position: Vec3, time: f32, idle_speed: f32) -> Vec3 {
    let amplitude = idle_speed * IDLE_AMPLITUDE_SCALE;
    let phase = time * IDLE_TIME_FREQUENCY;
    Vec3::new(
        (phase + position.y * IDLE_SPATIAL_FREQUENCY).sin() * amplitude,
        (phase + position.x * IDLE_SPATIAL_FREQUENCY).cos() * amplitude,
        0.0,
    )
}

/// Force from a single hand on a particle at `position`
///
/// Linear falloff to zero at [`INTERACTION_RADIUS`]. Pinching hands attract,
/// open hands repel, neutral hands do nothing.
pub fn hand_force(position: Vec3, hand: &HandInput, interaction_strength: f32) -> Vec3 {
    let offset = position - hand.world_position;
    let dist = offset.length();

    // Coincident points have no direction to push along
    if dist >= INTERACTION_RADIUS || dist <= f32::EPSILON {
        return Vec3::ZERO;
    }

    let falloff =
        (1.0 - dist / INTERACTION_RADIUS) * interaction_strength * INTERACTION_FORCE_SCALE;
    let direction = offset / dist;

    match hand.gesture() {
        Gesture::Pinch => -direction * falloff * PINCH_ATTRACT_SCALE,
        Gesture::Open => direction * falloff,
        Gesture::Neutral => Vec3::ZERO,
    }
}

/// Sum of all hand forces on a particle
pub fn total_hand_force(position: Vec3, hands: &[HandInput], interaction_strength: f32) -> Vec3 {
    hands
        .iter()
        .map(|hand| hand_force(position, hand, interaction_strength))
        .fold(Vec3::ZERO, |acc, f| acc + f)
}

/// Spring pulling a particle back toward its anchor
pub fn elastic_return(anchor: Vec3, position: Vec3) -> Vec3 {
    (anchor - position) * RETURN_FORCE
}
