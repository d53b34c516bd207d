//! Error types for the particle field

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// A configuration value was negative or not finite
    #[error("invalid configuration: {field} = {value}")]
    InvalidConfiguration { field: &'static str, value: f32 },

    /// Requested more particles than the field supports
    #[error("particle count {requested} exceeds the maximum of {max}")]
    TooManyParticles { requested: usize, max: usize },

    /// Explicit anchors did not match the configured particle count
    #[error("{anchors} anchors supplied for a configured count of {configured}")]
    AnchorCountMismatch { anchors: usize, configured: usize },
}

pub type Result<T> = std::result::Result<T, FieldError>;
