//! Utility helpers: the particle arena, vector math and step profiling.

pub mod allocator;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, ParticleId};
pub use math::*;
pub use profiling::{ScopedTimer, StepProfile};
