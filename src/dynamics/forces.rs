use std::sync::Arc;

use glam::Vec3;

use crate::{
    core::particle::Particle,
    utils::allocator::{Arena, ParticleId},
};

/// Contributes a force to a particle's accumulator once per tick.
pub trait ForceGenerator: Send + Sync {
    fn update_force(&self, particle: &mut Particle, dt: f32);
}

/// Uniform gravitational field. Immovable particles are left alone.
#[derive(Debug, Clone, Copy)]
pub struct GravityForce {
    pub gravity: Vec3,
}

impl GravityForce {
    pub fn new(gravity: Vec3) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for GravityForce {
    fn update_force(&self, particle: &mut Particle, _dt: f32) {
        if !particle.has_finite_mass() {
            return;
        }
        particle.add_force(self.gravity * particle.mass());
    }
}

/// Linear plus quadratic drag resisting the direction of motion.
#[derive(Debug, Clone, Copy)]
pub struct DragForce {
    pub linear_coefficient: f32,
    pub quadratic_coefficient: f32,
}

impl DragForce {
    pub fn new(linear_coefficient: f32, quadratic_coefficient: f32) -> Self {
        Self {
            linear_coefficient,
            quadratic_coefficient,
        }
    }
}

impl ForceGenerator for DragForce {
    fn update_force(&self, particle: &mut Particle, _dt: f32) {
        let speed = particle.velocity.length();
        if speed < 1e-6 {
            return;
        }

        let magnitude =
            self.linear_coefficient * speed + self.quadratic_coefficient * speed * speed;
        particle.add_force(-particle.velocity / speed * magnitude);
    }
}

/// Hookean spring tying a particle to a fixed anchor point.
#[derive(Debug, Clone, Copy)]
pub struct SpringForce {
    pub anchor: Vec3,
    pub rest_length: f32,
    pub spring_constant: f32,
}

impl SpringForce {
    pub fn new(anchor: Vec3, rest_length: f32, spring_constant: f32) -> Self {
        Self {
            anchor,
            rest_length,
            spring_constant,
        }
    }
}

impl ForceGenerator for SpringForce {
    fn update_force(&self, particle: &mut Particle, _dt: f32) {
        let displacement = particle.position - self.anchor;
        let distance = displacement.length();
        if distance < 1e-6 {
            return;
        }

        let extension = distance - self.rest_length;
        particle.add_force(-self.spring_constant * extension * (displacement / distance));
    }
}

struct ForceRegistration {
    particle: ParticleId,
    generator: Arc<dyn ForceGenerator>,
}

/// Many-to-many association between particles and force generators.
///
/// Registrations persist across ticks until [`ForceRegistry::clear`] or
/// [`ForceRegistry::remove`] is called.
#[derive(Default)]
pub struct ForceRegistry {
    registrations: Vec<ForceRegistration>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, particle: ParticleId, generator: Arc<dyn ForceGenerator>) {
        self.registrations.push(ForceRegistration {
            particle,
            generator,
        });
    }

    /// Drops the registration pairing `particle` with this exact generator instance.
    pub fn remove(&mut self, particle: ParticleId, generator: &Arc<dyn ForceGenerator>) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|entry| {
            !(entry.particle == particle && Arc::ptr_eq(&entry.generator, generator))
        });
        self.registrations.len() != before
    }

    /// Removes every registration. Forces already accumulated on particles stay.
    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    /// Runs every registered generator against its particle once.
    pub fn apply_force(&self, particles: &mut Arena<Particle>, dt: f32) {
        for entry in &self.registrations {
            if let Some(particle) = particles.get_mut(entry.particle) {
                entry.generator.update_force(particle, dt);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_skips_immovable_particles() {
        let gravity = GravityForce::new(Vec3::new(0.0, -10.0, 0.0));
        let mut wall = Particle::immovable(Vec3::ZERO, 1.0);
        gravity.update_force(&mut wall, 0.02);
        assert_eq!(wall.accumulated_force(), Vec3::ZERO);

        let mut ball = Particle::new(Vec3::ZERO, 0.5, 2.0);
        gravity.update_force(&mut ball, 0.02);
        assert!((ball.accumulated_force().y + 20.0).abs() < 1e-4);
    }

    #[test]
    fn drag_opposes_velocity() {
        let drag = DragForce::new(0.5, 0.1);
        let mut ball = Particle::new(Vec3::ZERO, 0.5, 1.0).with_velocity(Vec3::new(2.0, 0.0, 0.0));
        drag.update_force(&mut ball, 0.02);
        // 0.5 * 2 + 0.1 * 4
        assert!((ball.accumulated_force().x + 1.4).abs() < 1e-5);
    }

    #[test]
    fn spring_pulls_toward_anchor_when_stretched() {
        let spring = SpringForce::new(Vec3::ZERO, 1.0, 10.0);
        let mut ball = Particle::new(Vec3::new(0.0, 3.0, 0.0), 0.5, 1.0);
        spring.update_force(&mut ball, 0.02);
        assert!((ball.accumulated_force().y + 20.0).abs() < 1e-4);
    }

    #[test]
    fn registry_visits_each_registration_once() {
        let mut particles = Arena::new();
        let a = particles.insert(Particle::new(Vec3::ZERO, 0.5, 1.0));
        let b = particles.insert(Particle::new(Vec3::X, 0.5, 1.0));

        let gravity: Arc<dyn ForceGenerator> = Arc::new(GravityForce::new(Vec3::NEG_Y));
        let mut registry = ForceRegistry::new();
        registry.add(a, gravity.clone());
        registry.add(a, gravity.clone());
        registry.add(b, gravity.clone());

        registry.apply_force(&mut particles, 0.02);

        assert_eq!(
            particles.get(a).map(Particle::accumulated_force),
            Some(Vec3::new(0.0, -2.0, 0.0))
        );
        assert_eq!(
            particles.get(b).map(Particle::accumulated_force),
            Some(Vec3::NEG_Y)
        );

        assert!(registry.remove(a, &gravity));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn stale_registrations_are_skipped() {
        let mut particles = Arena::new();
        let stale = particles.insert(Particle::default());
        particles.clear();

        let mut registry = ForceRegistry::new();
        registry.add(stale, Arc::new(GravityForce::new(Vec3::NEG_Y)));
        registry.apply_force(&mut particles, 0.02);
        assert!(particles.is_empty());
    }
}
