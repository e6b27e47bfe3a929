//! Priority-ordered iterative contact resolution.
//!
//! Each tick the resolver runs two passes over the contacts it is handed:
//!
//! 1. **Velocity**: the contact closing fastest is resolved first by an
//!    impulse along its normal, then the separating velocities of contacts
//!    that share a particle with it are refreshed.
//! 2. **Interpenetration**: the deepest contact is pushed apart first, then
//!    the penetration of contacts sharing a moved particle is adjusted.
//!
//! Both passes stop once nothing is violated or the iteration budget
//! (`iteration_multiplier × contact count`) is spent. Whatever remains is
//! left for the next tick.

use glam::Vec3;

use crate::{
    collision::contact::Contact,
    config::DEFAULT_ITERATION_MULTIPLIER,
    core::particle::Particle,
    utils::{
        allocator::{Arena, ParticleId},
        math::tangential_component,
    },
};

/// Outcome of a single [`ContactResolver::resolve`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ResolverStats {
    pub contacts: usize,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    pub velocity_converged: bool,
    pub position_converged: bool,
    pub normal_impulse_sum: f32,
}

#[derive(Debug, Clone)]
pub struct ContactResolver {
    pub iteration_multiplier: usize,
}

impl Default for ContactResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATION_MULTIPLIER)
    }
}

impl ContactResolver {
    pub fn new(iteration_multiplier: usize) -> Self {
        Self {
            iteration_multiplier: iteration_multiplier.max(1),
        }
    }

    /// Iterations allowed per pass for `contact_count` contacts.
    pub fn budget(&self, contact_count: usize) -> usize {
        self.iteration_multiplier.max(1) * contact_count
    }

    /// Resolves `contacts` against `particles`.
    ///
    /// Contact penetrations are updated in place as particles move; the
    /// caller owns the slice and decides when to discard it.
    pub fn resolve(
        &self,
        contacts: &mut [Contact],
        particles: &mut Arena<Particle>,
        _dt: f32,
    ) -> ResolverStats {
        let mut stats = ResolverStats {
            contacts: contacts.len(),
            velocity_converged: true,
            position_converged: true,
            ..ResolverStats::default()
        };
        if contacts.is_empty() {
            return stats;
        }

        let budget = self.budget(contacts.len());
        let movable: Vec<bool> = contacts
            .iter()
            .map(|contact| contact.total_inverse_mass(particles) > 0.0)
            .collect();

        self.resolve_velocities(contacts, &movable, particles, budget, &mut stats);
        self.resolve_interpenetration(contacts, &movable, particles, budget, &mut stats);

        if !stats.velocity_converged || !stats.position_converged {
            log::debug!(
                "contact budget of {budget} exhausted ({} contacts, velocity: {}, position: {})",
                stats.contacts,
                stats.velocity_converged,
                stats.position_converged
            );
        }
        stats
    }

    fn resolve_velocities(
        &self,
        contacts: &[Contact],
        movable: &[bool],
        particles: &mut Arena<Particle>,
        budget: usize,
        stats: &mut ResolverStats,
    ) {
        let mut separating: Vec<f32> = contacts
            .iter()
            .map(|contact| contact.separating_velocity(particles))
            .collect();

        loop {
            let Some(index) = select_closing(contacts, movable, &separating) else {
                stats.velocity_converged = true;
                return;
            };
            if stats.velocity_iterations >= budget {
                stats.velocity_converged = false;
                return;
            }

            let contact = contacts[index];
            stats.normal_impulse_sum += apply_impulse(&contact, separating[index], particles);
            stats.velocity_iterations += 1;

            for (other, slot) in contacts.iter().zip(separating.iter_mut()) {
                if shares_particle(other, &contact) {
                    *slot = other.separating_velocity(particles);
                }
            }
        }
    }

    fn resolve_interpenetration(
        &self,
        contacts: &mut [Contact],
        movable: &[bool],
        particles: &mut Arena<Particle>,
        budget: usize,
        stats: &mut ResolverStats,
    ) {
        loop {
            let Some(index) = select_deepest(contacts, movable) else {
                stats.position_converged = true;
                return;
            };
            if stats.position_iterations >= budget {
                stats.position_converged = false;
                return;
            }

            let contact = contacts[index];
            let (move_first, move_second) = separate(&contact, particles);
            contacts[index].penetration = 0.0;
            stats.position_iterations += 1;

            for (i, other) in contacts.iter_mut().enumerate() {
                if i == index {
                    continue;
                }
                adjust_penetration(other, contact.first, move_first);
                if let Some(second) = contact.second {
                    adjust_penetration(other, second, move_second);
                }
            }
        }
    }
}

/// Most negative separating velocity; ties go to the deeper contact.
fn select_closing(contacts: &[Contact], movable: &[bool], separating: &[f32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, contact) in contacts.iter().enumerate() {
        if !movable[i] || separating[i] >= 0.0 {
            continue;
        }
        best = match best {
            Some(current)
                if separating[i] > separating[current]
                    || (separating[i] == separating[current]
                        && contact.penetration <= contacts[current].penetration) =>
            {
                Some(current)
            }
            _ => Some(i),
        };
    }
    best
}

fn select_deepest(contacts: &[Contact], movable: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, contact) in contacts.iter().enumerate() {
        if !movable[i] || contact.penetration <= 0.0 {
            continue;
        }
        if best.map_or(true, |current| contact.penetration > contacts[current].penetration) {
            best = Some(i);
        }
    }
    best
}

fn shares_particle(other: &Contact, resolved: &Contact) -> bool {
    other.involves(resolved.first) || resolved.second.is_some_and(|id| other.involves(id))
}

/// Applies the restitution impulse (and bounded friction) for one contact.
/// Returns the magnitude of the normal impulse.
fn apply_impulse(contact: &Contact, separating: f32, particles: &mut Arena<Particle>) -> f32 {
    let total_inverse_mass = contact.total_inverse_mass(particles);
    if total_inverse_mass <= 0.0 || separating >= 0.0 {
        return 0.0;
    }

    let target = -separating * contact.restitution;
    let normal_impulse = (target - separating) / total_inverse_mass;
    let mut impulse = contact.normal * normal_impulse;

    if contact.friction > 0.0 {
        let relative = relative_velocity(contact, particles);
        let sliding = tangential_component(relative, contact.normal);
        let speed = sliding.length();
        if speed > 1e-6 {
            let stopping = speed / total_inverse_mass;
            let magnitude = stopping.min(contact.friction * normal_impulse);
            impulse -= sliding / speed * magnitude;
        }
    }

    push_velocity(particles, contact.first, impulse);
    if let Some(second) = contact.second {
        push_velocity(particles, second, -impulse);
    }
    normal_impulse
}

fn relative_velocity(contact: &Contact, particles: &Arena<Particle>) -> Vec3 {
    let first = particles.get(contact.first).map_or(Vec3::ZERO, |p| p.velocity);
    let second = contact
        .second
        .and_then(|id| particles.get(id))
        .map_or(Vec3::ZERO, |p| p.velocity);
    first - second
}

fn push_velocity(particles: &mut Arena<Particle>, id: ParticleId, impulse: Vec3) {
    if let Some(particle) = particles.get_mut(id) {
        particle.velocity += impulse * particle.inverse_mass();
    }
}

/// Moves both bodies apart along the normal until the contact's penetration
/// is zero. Returns the displacement applied to each side.
fn separate(contact: &Contact, particles: &mut Arena<Particle>) -> (Vec3, Vec3) {
    let total_inverse_mass = contact.total_inverse_mass(particles);
    if total_inverse_mass <= 0.0 || contact.penetration <= 0.0 {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    let move_per_inverse_mass = contact.normal * (contact.penetration / total_inverse_mass);
    let move_first = displace(particles, contact.first, move_per_inverse_mass);
    let move_second = contact
        .second
        .map_or(Vec3::ZERO, |id| displace(particles, id, -move_per_inverse_mass));
    (move_first, move_second)
}

fn displace(particles: &mut Arena<Particle>, id: ParticleId, per_inverse_mass: Vec3) -> Vec3 {
    match particles.get_mut(id) {
        Some(particle) => {
            let delta = per_inverse_mass * particle.inverse_mass();
            particle.position += delta;
            delta
        }
        None => Vec3::ZERO,
    }
}

fn adjust_penetration(contact: &mut Contact, moved: ParticleId, delta: Vec3) {
    if delta == Vec3::ZERO {
        return;
    }
    if contact.first == moved {
        contact.penetration -= delta.dot(contact.normal);
    } else if contact.second == Some(moved) {
        contact.penetration += delta.dot(contact.normal);
    }
}
