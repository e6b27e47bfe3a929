//! Read-only particle data handed to a presentation layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    core::{particle::Particle, types::Color},
    utils::allocator::{Arena, ParticleId},
};

/// What a renderer needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub id: ParticleId,
    pub position: Vec3,
    pub radius: f32,
    pub color: Color,
}

impl ParticleView {
    pub fn new(id: ParticleId, particle: &Particle) -> Self {
        Self {
            id,
            position: particle.position,
            radius: particle.radius(),
            color: particle.color,
        }
    }
}

/// Reusable buffer of particle views plus the simulation clock.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub elapsed: f32,
    pub particles: Vec<ParticleView>,
}

impl RenderSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refills the buffer from the arena without reallocating when possible.
    pub fn sync(&mut self, particles: &Arena<Particle>, elapsed: f32) {
        self.elapsed = elapsed;
        self.particles.clear();
        self.particles
            .extend(particles.iter().map(|(id, particle)| ParticleView::new(id, particle)));
    }
}
