//! Gesture normalizer
//!
//! Turns raw per-frame landmark sets into smoothed, classified [`HandInput`]s
//! in normalized [-1, 1] view space.
//!
//! Smoothing state is kept per *slot*, i.e. per position in the frame's hand
//! list, not per physical hand. If the tracker reorders hands between frames,
//! slot 0 will glide from one hand to the other.

use crate::error::Result;
use crate::landmarks::{HandLandmarks, Landmark};
use flux_physics::HandInput;
use glam::Vec3;

/// Weight of the newest sample in the moving average
pub const SMOOTHING_ALPHA: f32 = 0.25;

/// Thumb-to-index distance below which a hand is pinching
pub const PINCH_THRESHOLD: f32 = 0.075;

/// Mean wrist-to-fingertip distance above which a hand is open
pub const OPEN_THRESHOLD: f32 = 0.38;

/// Normalized hands for one tracked frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<HandInput>,
}

impl HandFrame {
    pub fn is_detected(&self) -> bool {
        !self.hands.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GestureNormalizer {
    alpha: f32,
    slots: Vec<Vec3>,
}

impl Default for GestureNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureNormalizer {
    pub fn new() -> Self {
        Self::with_alpha(SMOOTHING_ALPHA)
    }

    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            slots: Vec::new(),
        }
    }

    /// Number of slots holding smoothing state
    pub fn tracked_slots(&self) -> usize {
        self.slots.len()
    }

    /// Forget all smoothing state
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    /// Process one tracked frame
    ///
    /// The whole frame is validated before any state changes, so a rejected
    /// frame leaves the smoothing history exactly as it was.
    pub fn process(&mut self, raw_hands: &[HandLandmarks]) -> Result<HandFrame> {
        if raw_hands.is_empty() {
            if !self.slots.is_empty() {
                log::debug!("No hands in frame, clearing {} smoothing slots", self.slots.len());
            }
            self.reset();
            return Ok(HandFrame::default());
        }

        for (index, hand) in raw_hands.iter().enumerate() {
            hand.validate(index)?;
        }

        let hands = raw_hands
            .iter()
            .enumerate()
            .map(|(slot, landmarks)| {
                let world_position = self.smooth(slot, target_position(landmarks));
                HandInput::new(world_position, is_pinching(landmarks), is_open(landmarks))
            })
            .collect();

        Ok(HandFrame { hands })
    }

    fn smooth(&mut self, slot: usize, target: Vec3) -> Vec3 {
        match self.slots.get_mut(slot) {
            Some(average) => {
                *average += (target - *average) * self.alpha;
                *average
            }
            None => {
                // Slots fill in order because hand lists are dense
                self.slots.push(target);
                target
            }
        }
    }
}

/// Thumb tip remapped to view space: x mirrored, y flipped, depth untouched
pub(crate) fn target_position(landmarks: &HandLandmarks) -> Vec3 {
    let thumb = landmarks.get(Landmark::ThumbTip);
    Vec3::new((1.0 - thumb.x) * 2.0 - 1.0, -(thumb.y * 2.0 - 1.0), thumb.z)
}

pub(crate) fn is_pinching(landmarks: &HandLandmarks) -> bool {
    landmarks.planar_distance(Landmark::ThumbTip, Landmark::IndexTip) < PINCH_THRESHOLD
}

pub(crate) fn is_open(landmarks: &HandLandmarks) -> bool {
    let total: f32 = Landmark::FINGERTIPS
        .iter()
        .map(|&tip| landmarks.planar_distance(tip, Landmark::Wrist))
        .sum();
    total / Landmark::FINGERTIPS.len() as f32 > OPEN_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackingError;
    use crate::landmarks::LANDMARK_COUNT;

    /// Curled hand at the wrist with the thumb tip at `thumb`
    fn hand_with_thumb(thumb: Vec3) -> HandLandmarks {
        let mut points = vec![Vec3::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
        points[Landmark::ThumbTip as usize] = thumb;
        points[Landmark::IndexTip as usize] = thumb + Vec3::new(0.2, 0.0, 0.0);
        HandLandmarks::new(points)
    }

    fn open_hand() -> HandLandmarks {
        let wrist = Vec3::new(0.5, 0.9, 0.0);
        let mut points = vec![wrist; LANDMARK_COUNT];
        points[Landmark::ThumbTip as usize] = Vec3::new(0.3, 0.6, 0.0);
        for (i, tip) in Landmark::FINGERTIPS.iter().enumerate() {
            points[*tip as usize] = Vec3::new(0.35 + i as f32 * 0.1, 0.45, 0.0);
        }
        HandLandmarks::new(points)
    }

    fn pinching_hand() -> HandLandmarks {
        let mut hand = hand_with_thumb(Vec3::new(0.5, 0.5, 0.0)).points().to_vec();
        hand[Landmark::IndexTip as usize] = Vec3::new(0.53, 0.52, 0.0);
        HandLandmarks::new(hand)
    }

    #[test]
    fn remaps_thumb_into_view_space() {
        let hand = hand_with_thumb(Vec3::new(0.25, 0.25, -0.1));
        let p = target_position(&hand);
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
        assert!((p.z + 0.1).abs() < 1e-6);
    }

    #[test]
    fn first_sighting_has_no_lag() {
        let mut normalizer = GestureNormalizer::new();
        let hand = hand_with_thumb(Vec3::new(0.1, 0.9, 0.0));
        let frame = normalizer.process(&[hand.clone()]).unwrap();
        assert_eq!(frame.hands[0].world_position, target_position(&hand));
    }

    #[test]
    fn smoothing_limits_jumps() {
        let mut normalizer = GestureNormalizer::new();
        let a = hand_with_thumb(Vec3::new(0.1, 0.1, 0.0));
        let b = hand_with_thumb(Vec3::new(0.9, 0.8, 0.05));

        let first = normalizer.process(&[a.clone()]).unwrap().hands[0].world_position;
        let second = normalizer.process(&[b.clone()]).unwrap().hands[0].world_position;

        let raw_jump = (target_position(&b) - target_position(&a)).length();
        let jump = (second - first).length();
        assert!(jump <= SMOOTHING_ALPHA * raw_jump + 1e-5, "{jump} vs {raw_jump}");
        assert!(jump > 0.0);
    }

    #[test]
    fn empty_frame_resets_state() {
        let mut normalizer = GestureNormalizer::new();
        let a = hand_with_thumb(Vec3::new(0.1, 0.1, 0.0));
        let b = hand_with_thumb(Vec3::new(0.9, 0.9, 0.0));

        normalizer.process(&[a.clone(), a]).unwrap();
        assert_eq!(normalizer.tracked_slots(), 2);

        let frame = normalizer.process(&[]).unwrap();
        assert!(!frame.is_detected());
        assert_eq!(normalizer.tracked_slots(), 0);

        let frame = normalizer.process(&[b.clone()]).unwrap();
        assert_eq!(frame.hands[0].world_position, target_position(&b));
    }

    #[test]
    fn fewer_hands_keep_remaining_slots() {
        let mut normalizer = GestureNormalizer::new();
        let a = hand_with_thumb(Vec3::new(0.2, 0.2, 0.0));
        normalizer.process(&[a.clone(), a.clone()]).unwrap();
        normalizer.process(&[a]).unwrap();
        assert_eq!(normalizer.tracked_slots(), 2);
    }

    #[test]
    fn classifies_gestures() {
        let mut normalizer = GestureNormalizer::new();
        let frame = normalizer
            .process(&[pinching_hand(), open_hand(), hand_with_thumb(Vec3::splat(0.5))])
            .unwrap();

        assert!(frame.hands[0].is_pinching);
        assert!(!frame.hands[0].is_open);

        assert!(frame.hands[1].is_open);
        assert!(!frame.hands[1].is_pinching);

        assert!(!frame.hands[2].is_pinching);
        assert!(!frame.hands[2].is_open);
    }

    #[test]
    fn short_hand_is_an_error_not_a_panic() {
        let mut normalizer = GestureNormalizer::new();
        let short = HandLandmarks::new(vec![Vec3::ZERO; 3]);
        assert_eq!(
            normalizer.process(&[short]),
            Err(TrackingError::LandmarkCount {
                hand: 0,
                expected: LANDMARK_COUNT,
                found: 3
            })
        );

        let mut points = vec![Vec3::splat(0.5); LANDMARK_COUNT];
        points[Landmark::ThumbTip as usize].x = f32::INFINITY;
        assert!(matches!(
            normalizer.process(&[HandLandmarks::new(points)]),
            Err(TrackingError::NonFiniteLandmark { hand: 0, landmark: 4 })
        ));
        assert_eq!(normalizer.tracked_slots(), 0);
    }

    #[test]
    fn malformed_frame_is_rejected_without_touching_state() {
        let mut normalizer = GestureNormalizer::new();
        let good = hand_with_thumb(Vec3::new(0.2, 0.2, 0.0));
        let before = normalizer.process(&[good.clone()]).unwrap();

        let bad = HandLandmarks::new(vec![Vec3::ZERO; 5]);
        let err = normalizer.process(&[good.clone(), bad]).unwrap_err();
        assert!(matches!(err, TrackingError::LandmarkCount { hand: 1, found: 5, .. }));
        assert_eq!(normalizer.tracked_slots(), 1);

        let after = normalizer.process(&[good]).unwrap();
        assert_eq!(before, after);
    }
}
