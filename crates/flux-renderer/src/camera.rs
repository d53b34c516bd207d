//! Camera and hand projection
//!
//! The camera sits on the +Z axis looking at the origin. Hands arrive in
//! normalized [-1, 1] view space and are projected onto the z = 0 plane at the
//! camera's focus distance.

use bytemuck::{Pod, Zeroable};
use flux_physics::HandInput;
use glam::{Mat4, Vec2, Vec3};

/// Hands reach slightly past the viewport edge
pub const HAND_OVERSCAN: f32 = 1.1;

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub point_size: f32,
}

/// Perspective camera framing the particle field
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 50.0,
            target: Vec3::ZERO,
            aspect: aspect_ratio(width, height).unwrap_or(1.0),
            fovy: 70.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target + Vec3::new(0.0, 0.0, self.distance)
    }

    /// Width and height of the view frustum at the focus distance
    pub fn visible_extent(&self) -> Vec2 {
        let height = 2.0 * (self.fovy / 2.0).tan() * self.distance;
        Vec2::new(height * self.aspect, height)
    }

    /// Map a normalized hand into field coordinates
    ///
    /// Depth is flattened onto the z = 0 plane: the interaction radius is
    /// measured in that plane regardless of how far the hand is from the
    /// camera.
    pub fn project_hand(&self, hand: &HandInput) -> HandInput {
        let half = self.visible_extent() * 0.5 * HAND_OVERSCAN;
        HandInput {
            world_position: Vec3::new(
                hand.world_position.x * half.x,
                hand.world_position.y * half.y,
                0.0,
            ),
            ..*hand
        }
    }

    pub fn project_hands(&self, hands: &[HandInput]) -> Vec<HandInput> {
        hands.iter().map(|hand| self.project_hand(hand)).collect()
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn to_uniform(&self, model: Mat4, point_size: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.build_view_projection_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            position: self.position().to_array(),
            point_size,
        }
    }

    /// Track a viewport resize; degenerate sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        match aspect_ratio(width, height) {
            Some(aspect) => self.aspect = aspect,
            None => log::debug!("Ignoring degenerate viewport {width}x{height}"),
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}
