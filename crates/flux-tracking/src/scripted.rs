//! Synthetic hand source
//!
//! Sweeps a single hand along a Lissajous path and cycles through pinch, open,
//! neutral and absent phases. Used for headless runs and tests when no camera
//! is attached.

use crate::landmarks::{HandLandmarks, Landmark, LANDMARK_COUNT};
use crate::source::{HandSource, TrackingEvent};
use flux_physics::Gesture;
use glam::Vec3;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

/// Phase of the scripted performance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPhase {
    Hand(Gesture),
    Absent,
}

const PHASES: [ScriptPhase; 4] = [
    ScriptPhase::Hand(Gesture::Pinch),
    ScriptPhase::Hand(Gesture::Open),
    ScriptPhase::Hand(Gesture::Neutral),
    ScriptPhase::Absent,
];

pub struct ScriptedHandSource {
    /// Frames per phase
    pub phase_frames: usize,
    /// Stop after this many frames; `None` runs until the receiver hangs up
    pub total_frames: Option<usize>,
    /// Delay between frames
    pub interval: Duration,
}

impl Default for ScriptedHandSource {
    fn default() -> Self {
        Self {
            phase_frames: 120,
            total_frames: None,
            interval: Duration::from_millis(33),
        }
    }
}

impl ScriptedHandSource {
    pub fn phase(&self, frame: usize) -> ScriptPhase {
        PHASES[(frame / self.phase_frames.max(1)) % PHASES.len()]
    }

    /// Landmarks the source emits for `frame`
    pub fn frame(&self, frame: usize) -> Vec<HandLandmarks> {
        match self.phase(frame) {
            ScriptPhase::Absent => Vec::new(),
            ScriptPhase::Hand(gesture) => {
                let t = frame as f32 / 30.0;
                let center = Vec3::new(
                    0.5 + 0.3 * (t * 0.9).sin(),
                    0.45 + 0.2 * (t * 1.3).sin(),
                    -0.05,
                );
                vec![synthetic_hand(center, gesture)]
            }
        }
    }
}

impl HandSource for ScriptedHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        if tx.send(TrackingEvent::Ready).is_err() {
            return;
        }

        let mut frame = 0usize;
        while self.total_frames.map_or(true, |total| frame < total) {
            if tx.send(TrackingEvent::Frame(self.frame(frame))).is_err() {
                return;
            }
            frame += 1;
            thread::sleep(self.interval);
        }
        log::debug!("Scripted hand source finished after {frame} frames");
    }
}

/// Build a 21-point hand whose thumb tip sits at `thumb` and whose geometry
/// classifies as `gesture`
pub fn synthetic_hand(thumb: Vec3, gesture: Gesture) -> HandLandmarks {
    let wrist = thumb + Vec3::new(0.05, 0.3, 0.05);
    let mut points = vec![wrist; LANDMARK_COUNT];
    points[Landmark::ThumbTip as usize] = thumb;

    for (i, tip) in Landmark::FINGERTIPS.iter().enumerate() {
        let spread = i as f32;
        points[*tip as usize] = match gesture {
            Gesture::Open => wrist + Vec3::new(-0.15 + 0.1 * spread, -0.45, 0.0),
            Gesture::Pinch | Gesture::Neutral => {
                wrist + Vec3::new(-0.05 + 0.03 * spread, -0.12, 0.0)
            }
        };
    }

    if gesture == Gesture::Pinch {
        points[Landmark::IndexTip as usize] = thumb + Vec3::new(0.03, 0.02, 0.0);
    }

    HandLandmarks::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{is_open, is_pinching};

    #[test]
    fn synthetic_hands_classify_as_requested() {
        let center = Vec3::new(0.5, 0.4, 0.0);

        let pinch = synthetic_hand(center, Gesture::Pinch);
        assert!(pinch.validate(0).is_ok());
        assert!(is_pinching(&pinch));
        assert!(!is_open(&pinch));

        let open = synthetic_hand(center, Gesture::Open);
        assert!(is_open(&open));
        assert!(!is_pinching(&open));

        let neutral = synthetic_hand(center, Gesture::Neutral);
        assert!(!is_open(&neutral));
        assert!(!is_pinching(&neutral));
    }

    #[test]
    fn phases_cycle() {
        let source = ScriptedHandSource {
            phase_frames: 10,
            ..Default::default()
        };
        assert_eq!(source.phase(0), ScriptPhase::Hand(Gesture::Pinch));
        assert_eq!(source.phase(15), ScriptPhase::Hand(Gesture::Open));
        assert_eq!(source.phase(25), ScriptPhase::Hand(Gesture::Neutral));
        assert!(source.frame(35).is_empty());
        assert_eq!(source.frame(40).len(), 1);
    }
}
