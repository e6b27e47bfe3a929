use glam::Vec3;

use crate::{
    core::particle::Particle,
    dynamics::resolver::{ContactResolver, ResolverStats},
    utils::allocator::{Arena, ParticleId},
};

/// A detected violation between a particle and another particle or the
/// static environment.
///
/// `normal` points toward `first`; resolution pushes `first` along it and
/// `second` against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub first: ParticleId,
    /// `None` for contacts against static geometry such as the ground.
    pub second: Option<ParticleId>,
    pub normal: Vec3,
    pub penetration: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl Contact {
    pub fn with_environment(
        particle: ParticleId,
        normal: Vec3,
        penetration: f32,
        restitution: f32,
    ) -> Self {
        Self {
            first: particle,
            second: None,
            normal,
            penetration,
            restitution,
            friction: 0.0,
        }
    }

    pub fn between(
        first: ParticleId,
        second: ParticleId,
        normal: Vec3,
        penetration: f32,
        restitution: f32,
    ) -> Self {
        Self {
            first,
            second: Some(second),
            normal,
            penetration,
            restitution,
            friction: 0.0,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn involves(&self, particle: ParticleId) -> bool {
        self.first == particle || self.second == Some(particle)
    }

    /// Separating velocity along the normal; negative while closing.
    pub fn separating_velocity(&self, particles: &Arena<Particle>) -> f32 {
        let velocity_a = particles.get(self.first).map_or(Vec3::ZERO, |p| p.velocity);
        let velocity_b = self
            .second
            .and_then(|id| particles.get(id))
            .map_or(Vec3::ZERO, |p| p.velocity);
        crate::utils::math::separating_velocity(velocity_a, velocity_b, self.normal)
    }

    /// Sum of the inverse masses of both bodies; zero when nothing can move.
    pub fn total_inverse_mass(&self, particles: &Arena<Particle>) -> f32 {
        let first = particles.get(self.first).map_or(0.0, Particle::inverse_mass);
        let second = self
            .second
            .and_then(|id| particles.get(id))
            .map_or(0.0, Particle::inverse_mass);
        first + second
    }
}

/// Contacts gathered during a single tick, emptied once resolved.
#[derive(Debug, Default, Clone)]
pub struct ContactRegistry {
    contacts: Vec<Contact>,
    resolver: ContactResolver,
}

impl ContactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(resolver: ContactResolver) -> Self {
        Self {
            contacts: Vec::new(),
            resolver,
        }
    }

    pub fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn resolver(&self) -> &ContactResolver {
        &self.resolver
    }

    /// Resolves every pending contact and empties the registry.
    pub fn resolve(&mut self, particles: &mut Arena<Particle>, dt: f32) -> ResolverStats {
        let stats = self.resolver.resolve(&mut self.contacts, particles, dt);
        self.contacts.clear();
        stats
    }
}
