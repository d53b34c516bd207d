//! Raw hand landmarks as delivered by a pose tracker
//!
//! Coordinates are normalized to the video frame: x and y in [0, 1] from the
//! top-left corner, z a relative depth with the wrist near zero.

use crate::error::{Result, TrackingError};
use glam::{Vec2, Vec3};

/// Landmarks per hand in the 21-point hand topology
pub const LANDMARK_COUNT: usize = 21;

/// Landmarks the gesture classifier reads
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    Wrist = 0,
    ThumbTip = 4,
    IndexTip = 8,
    MiddleTip = 12,
    RingTip = 16,
    PinkyTip = 20,
}

impl Landmark {
    /// Fingertips used for the open-hand test
    pub const FINGERTIPS: [Landmark; 4] = [
        Landmark::IndexTip,
        Landmark::MiddleTip,
        Landmark::RingTip,
        Landmark::PinkyTip,
    ];
}

/// One hand's landmarks for one video frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Vec3>,
}

impl HandLandmarks {
    /// Wrap a tracker's raw output. Not validated until [`HandLandmarks::validate`].
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Check the tracker's contract; `hand` is only used for the error report
    pub fn validate(&self, hand: usize) -> Result<()> {
        if self.points.len() != LANDMARK_COUNT {
            return Err(TrackingError::LandmarkCount {
                hand,
                expected: LANDMARK_COUNT,
                found: self.points.len(),
            });
        }
        if let Some(landmark) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(TrackingError::NonFiniteLandmark { hand, landmark });
        }
        Ok(())
    }

    /// Landmark position. Callers must have validated the set.
    #[inline]
    pub(crate) fn get(&self, landmark: Landmark) -> Vec3 {
        self.points[landmark as usize]
    }

    /// Distance between two landmarks in the image plane (depth ignored)
    pub(crate) fn planar_distance(&self, a: Landmark, b: Landmark) -> f32 {
        let pa = self.get(a);
        let pb = self.get(b);
        Vec2::new(pa.x - pb.x, pa.y - pb.y).length()
    }
}

impl From<Vec<Vec3>> for HandLandmarks {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}
