//! Global configuration for the particle simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default gravitational acceleration (Y-up, Martian surface gravity).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -3.711, 0.0];

/// Largest frame delta a host should hand to the core (in seconds).
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.02;

/// Fraction of velocity a free particle retains after one second.
pub const DEFAULT_DAMPING: f32 = 0.9;

/// Number of particles spawned on reset.
pub const DEFAULT_PARTICLE_COUNT: usize = 10;

/// Edge length of the spawn volume; particles appear in the upper half.
pub const DEFAULT_SPAWN_RANGE: f32 = 16.0;

/// Height of the ground plane along Y.
pub const DEFAULT_GROUND_HEIGHT: f32 = 0.0;

/// Restitution used for contacts against the ground.
pub const DEFAULT_GROUND_RESTITUTION: f32 = 0.6;

/// Restitution used for particle-particle contacts.
pub const DEFAULT_PARTICLE_RESTITUTION: f32 = 0.8;

/// Resolver iterations allowed per contact, per pass.
pub const DEFAULT_ITERATION_MULTIPLIER: usize = 2;

/// Seed for the population scatter.
pub const DEFAULT_SEED: u64 = 10;

/// Radius range of spawned particles.
pub const SPAWN_RADIUS_RANGE: (f32, f32) = (0.1, 1.0);

/// Spawned particle mass per unit of radius.
pub const MASS_PER_RADIUS: f32 = 100.0;

/// Tunable parameters for a [`ParticleWorld`](crate::world::ParticleWorld).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub spawn_range: f32,
    pub gravity: Vec3,
    pub damping: f32,
    pub ground_height: f32,
    pub ground_restitution: f32,
    pub ground_friction: f32,
    pub particle_restitution: f32,
    pub particle_friction: f32,
    pub iteration_multiplier: usize,
    pub max_frame_dt: f32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            spawn_range: DEFAULT_SPAWN_RANGE,
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            damping: DEFAULT_DAMPING,
            ground_height: DEFAULT_GROUND_HEIGHT,
            ground_restitution: DEFAULT_GROUND_RESTITUTION,
            ground_friction: 0.0,
            particle_restitution: DEFAULT_PARTICLE_RESTITUTION,
            particle_friction: 0.0,
            iteration_multiplier: DEFAULT_ITERATION_MULTIPLIER,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_restitution("ground", self.ground_restitution)?;
        check_restitution("particle", self.particle_restitution)?;
        check_friction("ground", self.ground_friction)?;
        check_friction("particle", self.particle_friction)?;

        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if self.iteration_multiplier == 0 {
            return Err(ConfigError::IterationMultiplier);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Gravity(self.gravity.to_array()));
        }
        if !(self.spawn_range.is_finite() && self.spawn_range > 0.0) {
            return Err(ConfigError::SpawnRange(self.spawn_range));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(ConfigError::MaxFrameDt(self.max_frame_dt));
        }
        if !self.ground_height.is_finite() {
            return Err(ConfigError::GroundHeight(self.ground_height));
        }
        Ok(())
    }
}

fn check_restitution(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Restitution { name, value })
    }
}

fn check_friction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Friction { name, value })
    }
}
