//! Contact detection: the contact value type, the per-tick registry, and the
//! ground and particle-particle generators.

pub mod contact;
pub mod generators;

pub use contact::{Contact, ContactRegistry};
pub use generators::{
    ContactGenerator, GroundContactGenerator, ParticleParticleContactGenerator, FALLBACK_NORMAL,
};
