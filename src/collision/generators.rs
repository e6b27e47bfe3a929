use glam::Vec3;

use super::contact::{Contact, ContactRegistry};
use crate::{
    core::particle::Particle,
    utils::{
        allocator::{Arena, ParticleId},
        math::normalize_or,
    },
};

/// Normal used when two particle centers coincide exactly.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Y;

/// Scans tracked particles and appends any contacts it finds.
///
/// Generators never move particles or resolve contacts themselves.
pub trait ContactGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Replaces the set of particles this generator watches.
    fn track(&mut self, particles: &[ParticleId]);

    /// Appends contacts to `registry`, returning how many were added.
    fn generate(&self, particles: &Arena<Particle>, registry: &mut ContactRegistry) -> usize;
}

/// Detects particles sinking below a horizontal ground plane.
#[derive(Debug, Clone)]
pub struct GroundContactGenerator {
    pub height: f32,
    pub restitution: f32,
    pub friction: f32,
    tracked: Vec<ParticleId>,
}

impl GroundContactGenerator {
    pub fn new(height: f32, restitution: f32) -> Self {
        Self {
            height,
            restitution,
            friction: 0.0,
            tracked: Vec::new(),
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

impl ContactGenerator for GroundContactGenerator {
    fn name(&self) -> &'static str {
        "ground"
    }

    fn track(&mut self, particles: &[ParticleId]) {
        self.tracked = particles.to_vec();
    }

    fn generate(&self, particles: &Arena<Particle>, registry: &mut ContactRegistry) -> usize {
        let mut added = 0;
        for &id in &self.tracked {
            let Some(particle) = particles.get(id) else {
                continue;
            };

            let clearance = particle.position.y - particle.radius() - self.height;
            if clearance < 0.0 {
                registry.add(
                    Contact::with_environment(id, Vec3::Y, -clearance, self.restitution)
                        .with_friction(self.friction),
                );
                added += 1;
            }
        }
        added
    }
}

/// Exhaustive pairwise overlap test between tracked spheres.
#[derive(Debug, Clone)]
pub struct ParticleParticleContactGenerator {
    pub restitution: f32,
    pub friction: f32,
    tracked: Vec<ParticleId>,
}

impl ParticleParticleContactGenerator {
    pub fn new(restitution: f32) -> Self {
        Self {
            restitution,
            friction: 0.0,
            tracked: Vec::new(),
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

impl ContactGenerator for ParticleParticleContactGenerator {
    fn name(&self) -> &'static str {
        "particle-particle"
    }

    fn track(&mut self, particles: &[ParticleId]) {
        self.tracked = particles.to_vec();
    }

    fn generate(&self, particles: &Arena<Particle>, registry: &mut ContactRegistry) -> usize {
        let mut added = 0;
        for (i, &id_a) in self.tracked.iter().enumerate() {
            let Some(a) = particles.get(id_a) else {
                continue;
            };

            for &id_b in &self.tracked[i + 1..] {
                if id_a == id_b {
                    continue;
                }
                let Some(b) = particles.get(id_b) else {
                    continue;
                };

                let offset = a.position - b.position;
                let distance = offset.length();
                let reach = a.radius() + b.radius();
                if distance >= reach {
                    continue;
                }

                let normal = normalize_or(offset, FALLBACK_NORMAL);
                registry.add(
                    Contact::between(id_a, id_b, normal, reach - distance, self.restitution)
                        .with_friction(self.friction),
                );
                added += 1;
            }
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with(particles: &[Particle]) -> (Arena<Particle>, Vec<ParticleId>) {
        let mut arena = Arena::new();
        let ids = particles.iter().cloned().map(|p| arena.insert(p)).collect();
        (arena, ids)
    }

    #[test]
    fn ground_emits_one_contact_per_penetrating_particle() {
        let (arena, ids) = arena_with(&[
            Particle::new(Vec3::new(0.0, 0.3, 0.0), 0.5, 1.0),
            Particle::new(Vec3::new(5.0, 2.0, 0.0), 0.5, 1.0),
            Particle::new(Vec3::new(-5.0, 0.0, 0.0), 0.25, 1.0),
        ]);
        let mut generator = GroundContactGenerator::new(0.0, 0.5);
        generator.track(&ids);

        let mut registry = ContactRegistry::new();
        assert_eq!(generator.generate(&arena, &mut registry), 2);

        let first = registry.contacts()[0];
        assert_eq!(first.first, ids[0]);
        assert_eq!(first.second, None);
        assert_eq!(first.normal, Vec3::Y);
        assert!((first.penetration - 0.2).abs() < 1e-6);
        assert_eq!(first.restitution, 0.5);
        assert!((registry.contacts()[1].penetration - 0.25).abs() < 1e-6);
    }

    #[test]
    fn ground_respects_plane_height() {
        let (arena, ids) = arena_with(&[Particle::new(Vec3::new(0.0, 2.2, 0.0), 0.5, 1.0)]);
        let mut generator = GroundContactGenerator::new(2.0, 0.5);
        generator.track(&ids);

        let mut registry = ContactRegistry::new();
        generator.generate(&arena, &mut registry);
        assert_eq!(registry.len(), 1);
        assert!((registry.contacts()[0].penetration - 0.3).abs() < 1e-5);
    }

    #[test]
    fn pairs_are_reported_once_with_normal_toward_first() {
        let (arena, ids) = arena_with(&[
            Particle::new(Vec3::new(1.5, 0.0, 0.0), 1.0, 1.0),
            Particle::new(Vec3::ZERO, 1.0, 1.0),
            Particle::new(Vec3::new(10.0, 0.0, 0.0), 1.0, 1.0),
        ]);
        let mut generator = ParticleParticleContactGenerator::new(0.9);
        generator.track(&ids);

        let mut registry = ContactRegistry::new();
        assert_eq!(generator.generate(&arena, &mut registry), 1);

        let contact = registry.contacts()[0];
        assert_eq!(contact.first, ids[0]);
        assert_eq!(contact.second, Some(ids[1]));
        assert!((contact.normal - Vec3::X).length() < 1e-6);
        assert!((contact.penetration - 0.5).abs() < 1e-6);
    }

    #[test]
    fn coincident_particles_use_fallback_normal() {
        let (arena, ids) = arena_with(&[
            Particle::new(Vec3::ONE, 0.5, 1.0),
            Particle::new(Vec3::ONE, 0.5, 1.0),
        ]);
        let mut generator = ParticleParticleContactGenerator::new(0.9);
        generator.track(&ids);

        let mut registry = ContactRegistry::new();
        generator.generate(&arena, &mut registry);

        let contact = registry.contacts()[0];
        assert_eq!(contact.normal, FALLBACK_NORMAL);
        assert!((contact.penetration - 1.0).abs() < 1e-6);
        assert!(contact.normal.is_finite());
    }

    #[test]
    fn generators_do_not_touch_particles() {
        let (arena, ids) = arena_with(&[
            Particle::new(Vec3::new(0.0, 0.2, 0.0), 0.5, 1.0),
            Particle::new(Vec3::new(0.4, 0.2, 0.0), 0.5, 1.0),
        ]);
        let snapshot: Vec<Particle> = arena.iter().map(|(_, p)| p.clone()).collect();

        let mut ground = GroundContactGenerator::new(0.0, 0.5);
        ground.track(&ids);
        let mut pairs = ParticleParticleContactGenerator::new(0.5);
        pairs.track(&ids);

        let mut registry = ContactRegistry::new();
        ground.generate(&arena, &mut registry);
        pairs.generate(&arena, &mut registry);

        assert_eq!(registry.len(), 3);
        let after: Vec<Particle> = arena.iter().map(|(_, p)| p.clone()).collect();
        assert_eq!(snapshot, after);
    }
}
