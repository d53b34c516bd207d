//! Classified hand input as seen by the particle field

use glam::Vec3;

/// Gesture a hand is currently making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Thumb and index fingertips together: attract
    Pinch,
    /// Fingers spread: repel
    Open,
    /// Neither; the hand exerts no force
    Neutral,
}

/// A single tracked hand for one frame
///
/// `is_pinching` and `is_open` are not mutually exclusive in the type; when
/// both are set the pinch wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandInput {
    pub world_position: Vec3,
    pub is_pinching: bool,
    pub is_open: bool,
}

impl HandInput {
    pub fn new(world_position: Vec3, is_pinching: bool, is_open: bool) -> Self {
        Self {
            world_position,
            is_pinching,
            is_open,
        }
    }

    pub fn pinching(world_position: Vec3) -> Self {
        Self::new(world_position, true, false)
    }

    pub fn open(world_position: Vec3) -> Self {
        Self::new(world_position, false, true)
    }

    /// Effective gesture, with pinch taking priority
    pub fn gesture(&self) -> Gesture {
        if self.is_pinching {
            Gesture::Pinch
        } else if self.is_open {
            Gesture::Open
        } else {
            Gesture::Neutral
        }
    }
}
