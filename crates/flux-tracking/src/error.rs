//! Error types for hand tracking input

use thiserror::Error;

/// Errors raised at the tracking boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    /// A hand did not carry the full landmark set
    #[error("hand {hand}: expected {expected} landmarks, found {found}")]
    LandmarkCount {
        hand: usize,
        expected: usize,
        found: usize,
    },

    /// A landmark coordinate was NaN or infinite
    #[error("hand {hand}: landmark {landmark} has a non-finite coordinate")]
    NonFiniteLandmark { hand: usize, landmark: usize },

    /// The tracking source could not be started
    #[error("hand tracking unavailable: {0}")]
    SourceUnavailable(String),
}

/// Result type for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;
