use crate::{core::particle::Particle, utils::allocator::Arena};

/// Steps every particle in an arena forward in time.
#[derive(Debug, Default, Clone, Copy)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }

    /// Integrates each particle by `dt`; a zero `dt` changes nothing.
    pub fn step(&self, particles: &mut Arena<Particle>, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for particle in particles.values_mut() {
            particle.integrate(dt);
        }
    }
}
