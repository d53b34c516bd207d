//! Slow "breathing" sway applied to the whole particle group

use glam::{Mat4, Quat};

/// Yaw drift in radians per second
pub const YAW_RATE: f32 = 0.05;
/// Pitch sway amplitude in radians
pub const PITCH_AMPLITUDE: f32 = 0.05;
/// Pitch sway frequency in radians per second
pub const PITCH_FREQUENCY: f32 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneMotion {
    pub rotation_x: f32,
    pub rotation_y: f32,
    elapsed: f32,
}

impl SceneMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds
    pub fn update(&mut self, delta: f32) {
        self.elapsed += delta;
        self.rotation_y += delta * YAW_RATE;
        self.rotation_x = (self.elapsed * PITCH_FREQUENCY).sin() * PITCH_AMPLITUDE;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Model matrix for the particle group
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation_x,
            self.rotation_y,
            0.0,
        ))
    }
}
