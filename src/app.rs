//! Headless frame loop
//!
//! Each frame drains the tracker, normalizes and projects the newest hands,
//! then steps the field with the current settings snapshot. Hands persist
//! between tracking frames, the way a camera running slower than the render
//! loop would leave them.

use anyhow::Result;
use flux_physics::{ColorTheme, HandInput};
use flux_renderer::{point_screen_size, Camera, RenderFrame, SceneMotion};
use flux_simulation::{FieldConfiguration, ParticleField};
use flux_tracking::{GestureNormalizer, TrackerHandle, TrackingStatus};
use std::collections::VecDeque;
use std::time::Instant;

/// Summary of one simulated frame
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub hands: usize,
    pub redraw: bool,
    pub mean_displacement: f32,
}

pub struct App {
    field: ParticleField,
    config: FieldConfiguration,
    normalizer: GestureNormalizer,
    camera: Camera,
    motion: SceneMotion,
    tracker: TrackerHandle,

    hands: Vec<HandInput>,
    hand_detected: bool,
    theme_cycle: Option<f32>,
    next_theme_change: f32,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    frame_counter: u64,
}

impl App {
    pub fn new(
        field: ParticleField,
        camera: Camera,
        tracker: TrackerHandle,
        theme_cycle: Option<f32>,
    ) -> Self {
        let config = *field.configuration();
        Self {
            field,
            config,
            normalizer: GestureNormalizer::new(),
            camera,
            motion: SceneMotion::new(),
            tracker,
            hands: Vec::new(),
            hand_detected: false,
            theme_cycle: theme_cycle.filter(|s| *s > 0.0),
            next_theme_change: theme_cycle.unwrap_or(0.0),
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
            frame_counter: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    fn poll_tracking(&mut self) {
        let poll = self.tracker.poll();

        if let TrackingStatus::Unavailable(_) = poll.status {
            if self.hand_detected {
                log::info!("Standby: hand tracking lost");
                self.hand_detected = false;
                self.normalizer.reset();
            }
            self.hands.clear();
            return;
        }

        let Some(raw_hands) = poll.latest_frame else {
            return;
        };

        match self.normalizer.process(&raw_hands) {
            Ok(frame) => {
                if frame.is_detected() != self.hand_detected {
                    self.hand_detected = frame.is_detected();
                    if self.hand_detected {
                        log::info!("Active interaction: {} hand(s)", frame.hands.len());
                    } else {
                        log::info!("Standby: no hands visible");
                    }
                }
                self.hands = self.camera.project_hands(&frame.hands);
            }
            Err(e) => log::warn!("Rejected tracking frame: {e}"),
        }
    }

    fn cycle_theme(&mut self) {
        let Some(period) = self.theme_cycle else {
            return;
        };
        if self.field.time() < self.next_theme_change {
            return;
        }
        self.next_theme_change += period;

        let current = self.config.color_theme;
        let index = ColorTheme::ALL
            .iter()
            .position(|theme| *theme == current)
            .unwrap_or(0);
        let next = ColorTheme::ALL[(index + 1) % ColorTheme::ALL.len()];
        log::info!("Switching theme: {current} -> {next}");
        self.config.color_theme = next;
    }

    /// Simulate one frame of `delta` seconds
    pub fn frame(&mut self, delta: f32) -> Result<FrameStats> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        self.frame_counter += 1;

        self.poll_tracking();
        self.cycle_theme();

        self.field.step(&self.config, &self.hands, delta)?;
        self.motion.update(delta);

        let uniform = self
            .camera
            .to_uniform(self.motion.model_matrix(), self.field.point_size());
        let frame = RenderFrame::capture(&mut self.field);
        if frame.changes.colors {
            log::debug!("Color buffer changed ({} bytes)", frame.color_bytes().len());
        }
        log::trace!(
            "frame {}: {} points, {} position bytes, head size {:.2}px at focus, camera at {:?}",
            self.frame_counter,
            frame.point_count(),
            frame.position_bytes().len(),
            point_screen_size(frame.point_size, 1.0, self.camera.distance),
            uniform.position
        );
        let redraw = frame.needs_redraw();

        Ok(FrameStats {
            hands: self.hands.len(),
            redraw,
            mean_displacement: mean_displacement(&self.field),
        })
    }

    /// Average wall time per frame over the recent window, in milliseconds
    pub fn average_frame_time(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }
}

/// Mean distance from each head to its anchor
pub fn mean_displacement(field: &ParticleField) -> f32 {
    if field.count() == 0 {
        return 0.0;
    }
    let total: f32 = field
        .anchors()
        .iter()
        .enumerate()
        .map(|(i, anchor)| (field.head_position(i) - *anchor).length())
        .sum();
    total / field.count() as f32
}
