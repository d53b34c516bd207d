//! Hand sources and the channel between them and the frame loop
//!
//! A source runs on its own thread and pushes [`TrackingEvent`]s. The frame
//! loop polls the [`TrackerHandle`] once per step, so hand data is always
//! applied at a step boundary.

use crate::error::TrackingError;
use crate::landmarks::HandLandmarks;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Message from a hand source
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// Camera and model are up
    Ready,
    /// Landmarks for one video frame; empty when no hand is visible
    Frame(Vec<HandLandmarks>),
    /// The source could not start or died
    Failed(String),
}

/// Anything that can deliver [`TrackingEvent`]s over a channel
pub trait HandSource: Send + 'static {
    /// Run until the receiver hangs up or the source is exhausted
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackingStatus {
    #[default]
    Booting,
    Ready,
    /// Non-fatal: the field keeps idling without hands
    Unavailable(String),
}

/// Result of draining the channel at a step boundary
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerPoll {
    pub status: TrackingStatus,
    /// Newest frame received since the last poll, if any
    pub latest_frame: Option<Vec<HandLandmarks>>,
}

/// Receiving end of a spawned hand source
pub struct TrackerHandle {
    rx: Receiver<TrackingEvent>,
    status: TrackingStatus,
}

impl TrackerHandle {
    pub fn new(rx: Receiver<TrackingEvent>) -> Self {
        Self {
            rx,
            status: TrackingStatus::Booting,
        }
    }

    pub fn status(&self) -> &TrackingStatus {
        &self.status
    }

    /// Drain pending events, keeping only the newest frame
    pub fn poll(&mut self) -> TrackerPoll {
        let mut latest_frame = None;
        let mut skipped = 0usize;

        loop {
            match self.rx.try_recv() {
                Ok(TrackingEvent::Ready) => {
                    log::info!("Hand tracking ready");
                    self.status = TrackingStatus::Ready;
                }
                Ok(TrackingEvent::Frame(hands)) => {
                    if latest_frame.replace(hands).is_some() {
                        skipped += 1;
                    }
                }
                Ok(TrackingEvent::Failed(reason)) => {
                    log::warn!("{}", TrackingError::SourceUnavailable(reason.clone()));
                    self.status = TrackingStatus::Unavailable(reason);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    let reason = match self.status {
                        TrackingStatus::Unavailable(_) => break,
                        TrackingStatus::Booting => "source exited before ready",
                        TrackingStatus::Ready => "source disconnected",
                    };
                    log::warn!("{}", TrackingError::SourceUnavailable(reason.into()));
                    self.status = TrackingStatus::Unavailable(reason.into());
                    break;
                }
            }
        }

        if skipped > 0 {
            log::trace!("Dropped {skipped} stale tracking frames");
        }

        TrackerPoll {
            status: self.status.clone(),
            latest_frame,
        }
    }
}

/// Spawn a hand source on its own thread and return the receiving end
pub fn spawn_hand_source<S: HandSource>(source: S) -> TrackerHandle {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    TrackerHandle::new(rx)
}
