//! Core particle types shared by every subsystem.

pub mod particle;
pub mod types;

pub use particle::Particle;
pub use types::Color;
