//! # Flux Renderer
//!
//! Renderer-facing side of the particle field: the camera that projects hands
//! into field space, the group sway transform, and the per-frame buffer
//! contract handed to a GPU backend.

pub mod camera;
pub mod frame;
pub mod motion;

pub use camera::*;
pub use frame::*;
pub use motion::*;
