//! What the renderer receives each frame
//!
//! Three parallel per-point buffers in the field's native layout, the point
//! size, and which buffers need re-uploading.

use flux_simulation::{BufferChanges, ParticleField};

/// Reference depth at which a point renders at its nominal size
pub const POINT_SIZE_REFERENCE_DEPTH: f32 = 400.0;

/// Borrowed view of the field's render buffers
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub positions: &'a [[f32; 3]],
    pub colors: &'a [[f32; 3]],
    pub opacities: &'a [f32],
    pub point_size: f32,
    pub changes: BufferChanges,
}

impl<'a> RenderFrame<'a> {
    /// Capture the field's buffers and consume its pending change flags
    pub fn capture(field: &'a mut ParticleField) -> Self {
        let changes = field.take_changes();
        let field: &'a ParticleField = field;
        Self {
            positions: field.positions(),
            colors: field.colors(),
            opacities: field.opacities(),
            point_size: field.point_size(),
            changes,
        }
    }

    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    pub fn needs_redraw(&self) -> bool {
        self.changes.any()
    }

    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn color_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.colors)
    }

    pub fn opacity_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.opacities)
    }
}

/// On-screen point size, brighter points drawn larger and farther points smaller
///
/// `view_depth` is the distance in front of the camera and must be positive.
pub fn point_screen_size(point_size: f32, opacity: f32, view_depth: f32) -> f32 {
    if view_depth <= 0.0 {
        return 0.0;
    }
    point_size * (1.0 + opacity * 0.5) * POINT_SIZE_REFERENCE_DEPTH / view_depth
}
