//! Particle Contacts – a real-time point-mass physics core.
//!
//! Particles accumulate forces from registered generators, integrate with
//! semi-implicit Euler, and are kept apart from the ground and from each
//! other by a priority-ordered iterative contact resolver.
//!
//! A tick runs in a fixed order: forces, integration, contact generation,
//! resolution. [`ParticleWorld`] drives that sequence and owns all state;
//! presentation code only reads [`ParticleView`]s and the simulation clock.
//! Nothing in this crate is reentrant; see [`ParticleWorld`] for details.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod view;
pub mod world;

pub use glam::Vec3;

pub use collision::{
    contact::{Contact, ContactRegistry},
    generators::{ContactGenerator, GroundContactGenerator, ParticleParticleContactGenerator},
};
pub use config::SimulationConfig;
pub use crate::core::{particle::Particle, types::Color};
pub use dynamics::{
    forces::{DragForce, ForceGenerator, ForceRegistry, GravityForce, SpringForce},
    integrator::Integrator,
    resolver::{ContactResolver, ResolverStats},
};
pub use error::ConfigError;
pub use utils::{
    allocator::{Arena, ParticleId},
    math::clamp_frame_dt,
    profiling::StepProfile,
};
pub use view::{ParticleView, RenderSnapshot};
pub use world::ParticleWorld;
