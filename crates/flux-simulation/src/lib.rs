//! # Flux Simulation
//!
//! The particle field: per-frame integration of idle drift, hand forces,
//! elastic return, damping and trail propagation over parallel arrays, plus
//! the configuration snapshot it reacts to.

pub mod error;
pub mod params;
pub mod simulation;

pub use error::*;
pub use params::*;
pub use simulation::*;
