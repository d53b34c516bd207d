//! # Flux Physics
//!
//! Force laws, trail layout and color themes for the hand-driven particle
//! field. Everything here is a pure per-particle function; state lives in
//! `flux-simulation`.

pub mod constants;
pub mod forces;
pub mod hand;
pub mod theme;
pub mod trail;

pub use constants::*;
pub use forces::*;
pub use hand::*;
pub use theme::*;
pub use trail::*;
