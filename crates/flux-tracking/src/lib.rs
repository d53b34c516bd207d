//! # Flux Tracking
//!
//! Hand input for the particle field: landmark validation, the gesture
//! normalizer that turns noisy landmarks into smoothed [`HandInput`]s, and the
//! threaded source plumbing that carries frames to the step loop.
//!
//! [`HandInput`]: flux_physics::HandInput

pub mod error;
pub mod landmarks;
pub mod normalizer;
pub mod scripted;
pub mod source;

pub use error::*;
pub use landmarks::*;
pub use normalizer::*;
pub use scripted::*;
pub use source::*;
