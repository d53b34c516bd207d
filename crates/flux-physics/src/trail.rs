//! Trail layout and propagation
//!
//! Points are stored flat: segment `g` of particle `i` lives at
//! `i * POINTS_PER_PARTICLE + g`, with the head at `g = 0`.

use crate::constants::*;

/// Flat point index of a trail segment
#[inline]
pub fn point_index(particle: usize, segment: usize) -> usize {
    particle * POINTS_PER_PARTICLE + segment
}

/// Static opacity of a trail segment
#[inline]
pub fn ghost_opacity(segment: usize) -> f32 {
    GHOST_OPACITY_DECAY.powi(segment as i32)
}

/// Pull every ghost toward the segment ahead of it
///
/// Walks tail to head so each segment follows its predecessor's position from
/// the previous frame. The head (`trail[0]`) is left untouched.
pub fn propagate_trail(trail: &mut [[f32; 3]]) {
    for g in (1..trail.len()).rev() {
        let ahead = trail[g - 1];
        let segment = &mut trail[g];
        for axis in 0..3 {
            segment[axis] += (ahead[axis] - segment[axis]) * TRAIL_FOLLOW;
        }
    }
}
