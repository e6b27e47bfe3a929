use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::types::Color;
use crate::{config::DEFAULT_DAMPING, utils::math::damping_factor};

/// Point mass with a spherical collision proxy.
///
/// Forces accumulate between ticks and are consumed by [`Particle::integrate`].
/// An inverse mass of zero marks the particle as immovable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    force_accumulator: Vec3,
    inverse_mass: f32,
    damping: f32,
    radius: f32,
    pub color: Color,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            force_accumulator: Vec3::ZERO,
            inverse_mass: 1.0,
            damping: DEFAULT_DAMPING,
            radius: 1.0,
            color: Color::WHITE,
        }
    }
}

impl Particle {
    pub fn new(position: Vec3, radius: f32, mass: f32) -> Self {
        let mut particle = Self {
            position,
            ..Self::default()
        };
        particle.set_radius(radius);
        particle.set_mass(mass);
        particle
    }

    /// Creates a particle that no force or impulse can move.
    pub fn immovable(position: Vec3, radius: f32) -> Self {
        let mut particle = Self::new(position, radius, 1.0);
        particle.inverse_mass = 0.0;
        particle
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.set_damping(damping);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Advances the particle by `dt` using semi-implicit Euler.
    ///
    /// Velocity picks up the accumulated force first, position then moves by
    /// the new velocity, and damping decays velocity by `damping^dt`. The
    /// accumulator is always cleared.
    pub fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        if self.inverse_mass <= 0.0 {
            self.clear_accumulator();
            return;
        }

        self.velocity += self.force_accumulator * self.inverse_mass * dt;
        self.position += self.velocity * dt;
        self.velocity *= damping_factor(self.damping, dt);

        self.clear_accumulator();
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.force_accumulator += force;
    }

    pub fn clear_accumulator(&mut self) {
        self.force_accumulator = Vec3::ZERO;
    }

    pub fn accumulated_force(&self) -> Vec3 {
        self.force_accumulator
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Sets the inverse mass; negative or non-finite values are clamped to zero.
    pub fn set_inverse_mass(&mut self, inverse_mass: f32) {
        if !(inverse_mass.is_finite() && inverse_mass >= 0.0) {
            log::warn!("rejecting inverse mass {inverse_mass}, treating particle as immovable");
            self.inverse_mass = 0.0;
            return;
        }
        self.inverse_mass = inverse_mass;
    }

    /// Sets the mass. Non-positive or infinite masses make the particle immovable.
    pub fn set_mass(&mut self, mass: f32) {
        self.inverse_mass = if mass.is_finite() && mass > 0.0 {
            1.0 / mass
        } else {
            0.0
        };
    }

    /// Mass of the particle, `f32::INFINITY` when immovable.
    pub fn mass(&self) -> f32 {
        if self.inverse_mass > 0.0 {
            1.0 / self.inverse_mass
        } else {
            f32::INFINITY
        }
    }

    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Sets the per-second velocity retention, clamped into `(0, 1]`.
    pub fn set_damping(&mut self, damping: f32) {
        if damping > 0.0 && damping <= 1.0 {
            self.damping = damping;
        } else {
            log::warn!("damping {damping} outside (0, 1], clamping");
            self.damping = if damping > 1.0 { 1.0 } else { f32::EPSILON };
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        if radius > 0.0 && radius.is_finite() {
            self.radius = radius;
        } else {
            log::warn!("radius {radius} must be positive, keeping {}", self.radius);
        }
    }

    pub fn kinetic_energy(&self) -> f32 {
        if self.has_finite_mass() {
            0.5 * self.mass() * self.velocity.length_squared()
        } else {
            0.0
        }
    }

    pub fn momentum(&self) -> Vec3 {
        if self.has_finite_mass() {
            self.velocity * self.mass()
        } else {
            Vec3::ZERO
        }
    }
}
