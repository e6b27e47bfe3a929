use std::sync::Arc;

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    collision::{
        contact::ContactRegistry,
        generators::{ContactGenerator, GroundContactGenerator, ParticleParticleContactGenerator},
    },
    config::{SimulationConfig, MASS_PER_RADIUS, SPAWN_RADIUS_RANGE},
    core::{particle::Particle, types::Color},
    dynamics::{
        forces::{ForceGenerator, ForceRegistry, GravityForce},
        integrator::Integrator,
        resolver::{ContactResolver, ResolverStats},
    },
    error::ConfigError,
    utils::{
        allocator::{Arena, ParticleId},
        math::clamp_frame_dt,
        profiling::{ScopedTimer, StepProfile},
    },
    view::{ParticleView, RenderSnapshot},
};

/// Simulation driver owning every particle, force registration and contact.
///
/// All other components refer to particles through [`ParticleId`]s handed out
/// by the world's arena. None of the mutating methods are reentrant: a host
/// sharing a world between threads must serialize access itself (for example
/// behind a `Mutex`), and must not call back into the world from inside a
/// force or contact generator.
pub struct ParticleWorld {
    config: SimulationConfig,
    particles: Arena<Particle>,
    force_registry: ForceRegistry,
    gravity: Arc<dyn ForceGenerator>,
    integrator: Integrator,
    contact_generators: Vec<Box<dyn ContactGenerator>>,
    contacts: ContactRegistry,
    rng: StdRng,
    elapsed: f32,
    running: bool,
    last_profile: StepProfile,
    last_resolution: ResolverStats,
}

impl Default for ParticleWorld {
    fn default() -> Self {
        let mut world = Self::build(SimulationConfig::default());
        world.reset();
        world
    }
}

impl ParticleWorld {
    /// Validates `config` and spawns the initial population.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::build(config);
        world.reset();
        Ok(world)
    }

    /// A world with the given configuration and no particles. The random
    /// stream is untouched, so a later [`reset`](Self::reset) spawns the same
    /// population [`new`](Self::new) would.
    pub fn empty(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let contact_generators: Vec<Box<dyn ContactGenerator>> = vec![
            Box::new(
                GroundContactGenerator::new(config.ground_height, config.ground_restitution)
                    .with_friction(config.ground_friction),
            ),
            Box::new(
                ParticleParticleContactGenerator::new(config.particle_restitution)
                    .with_friction(config.particle_friction),
            ),
        ];

        Self {
            particles: Arena::with_capacity(config.particle_count),
            force_registry: ForceRegistry::new(),
            gravity: Arc::new(GravityForce::new(config.gravity)),
            integrator: Integrator::new(),
            contact_generators,
            contacts: ContactRegistry::with_resolver(ContactResolver::new(
                config.iteration_multiplier,
            )),
            rng: StdRng::seed_from_u64(config.seed),
            elapsed: 0.0,
            running: false,
            last_profile: StepProfile::default(),
            last_resolution: ResolverStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Discards the current population and scatters a fresh one.
    ///
    /// Particles, force registrations and pending contacts are dropped
    /// together and the clock returns to zero. The random stream is not
    /// reseeded, so successive resets yield different but reproducible
    /// populations.
    pub fn reset(&mut self) {
        self.clear();

        let half = self.config.spawn_range / 2.0;
        for _ in 0..self.config.particle_count {
            let position = Vec3::new(
                self.rng.gen_range(-half..half),
                self.rng.gen_range(half..self.config.spawn_range),
                self.rng.gen_range(-half..half),
            );
            let color = Color::new(self.rng.gen(), self.rng.gen(), self.rng.gen());
            let radius = self.rng.gen_range(SPAWN_RADIUS_RANGE.0..SPAWN_RADIUS_RANGE.1);

            let particle = Particle::new(position, radius, radius * MASS_PER_RADIUS)
                .with_damping(self.config.damping)
                .with_color(color);
            let id = self.particles.insert(particle);
            self.force_registry.add(id, self.gravity.clone());
        }
        self.retrack();

        log::debug!("reset world with {} particles", self.particles.len());
    }

    /// Removes every particle, registration and contact and zeroes the clock.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.force_registry.clear();
        self.contacts.clear();
        self.retrack();
        self.elapsed = 0.0;
        self.last_profile.reset();
        self.last_resolution = ResolverStats::default();
    }

    /// Restarts the random stream; the next [`reset`](Self::reset) uses it.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Population size used by the next reset.
    pub fn set_particle_count(&mut self, count: usize) {
        self.config.particle_count = count;
    }

    /// Inserts a particle tracked by every contact generator. It receives no
    /// forces until registered.
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = self.particles.insert(particle);
        self.retrack();
        id
    }

    /// Inserts a particle and registers it with the world's gravity.
    pub fn add_particle_with_gravity(&mut self, particle: Particle) -> ParticleId {
        let id = self.add_particle(particle);
        self.force_registry.add(id, self.gravity.clone());
        id
    }

    /// Registers `generator` for `particle`. Ids that no longer resolve are
    /// ignored and reported as `false`.
    pub fn register_force(
        &mut self,
        particle: ParticleId,
        generator: Arc<dyn ForceGenerator>,
    ) -> bool {
        if !self.particles.contains(particle) {
            log::warn!("ignoring force registration for stale particle {particle:?}");
            return false;
        }
        self.force_registry.add(particle, generator);
        true
    }

    /// Adds a generator that runs after the built-in ground and pair passes.
    pub fn add_contact_generator(&mut self, mut generator: Box<dyn ContactGenerator>) {
        let ids: Vec<ParticleId> = self.particles.ids().collect();
        generator.track(&ids);
        self.contact_generators.push(generator);
    }

    /// The shared gravity generator every spawned particle is registered with.
    pub fn gravity(&self) -> Arc<dyn ForceGenerator> {
        self.gravity.clone()
    }

    pub fn force_registry(&self) -> &ForceRegistry {
        &self.force_registry
    }

    pub fn force_registry_mut(&mut self) -> &mut ForceRegistry {
        &mut self.force_registry
    }

    pub fn contacts(&self) -> &ContactRegistry {
        &self.contacts
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Simulated seconds since the last reset.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Clamps a raw host frame delta with `max_frame_dt`, then steps.
    pub fn step_frame(&mut self, raw_dt: f32) {
        let dt = clamp_frame_dt(raw_dt, self.config.max_frame_dt);
        self.step(dt);
    }

    /// Advances the clock and runs one tick while the world is running.
    ///
    /// `dt` is expected to be pre-clamped by the caller; zero is a no-op tick.
    /// Negative or NaN deltas are ignored.
    pub fn step(&mut self, dt: f32) {
        if !self.running || dt.is_nan() || dt < 0.0 {
            return;
        }
        self.elapsed += dt;
        if dt > 0.0 {
            self.tick(dt);
        }
    }

    /// Runs the force, integrate, detect and resolve sequence once,
    /// regardless of the run flag and without touching the clock.
    pub fn tick(&mut self, dt: f32) -> ResolverStats {
        let mut profile = StepProfile {
            particle_count: self.particles.len(),
            ..StepProfile::default()
        };

        {
            let _timer = ScopedTimer::new("forces", &mut profile.force_time);
            self.force_registry.apply_force(&mut self.particles, dt);
        }
        {
            let _timer = ScopedTimer::new("integrate", &mut profile.integrate_time);
            self.integrator.step(&mut self.particles, dt);
        }
        {
            let _timer = ScopedTimer::new("contacts::generate", &mut profile.detect_time);
            for generator in &self.contact_generators {
                let added = generator.generate(&self.particles, &mut self.contacts);
                log::trace!("{} generator produced {added} contacts", generator.name());
            }
        }
        profile.contact_count = self.contacts.len();

        let stats = {
            let _timer = ScopedTimer::new("contacts::resolve", &mut profile.resolve_time);
            self.contacts.resolve(&mut self.particles, dt)
        };
        profile.velocity_iterations = stats.velocity_iterations;
        profile.position_iterations = stats.position_iterations;

        profile.report();
        self.last_profile = profile;
        self.last_resolution = stats;
        stats
    }

    pub fn last_profile(&self) -> &StepProfile {
        &self.last_profile
    }

    pub fn last_resolution(&self) -> &ResolverStats {
        &self.last_resolution
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id)
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles.iter()
    }

    pub fn particle_ids(&self) -> Vec<ParticleId> {
        self.particles.ids().collect()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn render_views(&self) -> Vec<ParticleView> {
        self.particles
            .iter()
            .map(|(id, particle)| ParticleView::new(id, particle))
            .collect()
    }

    /// Refreshes a host-owned snapshot buffer.
    pub fn sync_snapshot(&self, snapshot: &mut RenderSnapshot) {
        snapshot.sync(&self.particles, self.elapsed);
    }

    fn retrack(&mut self) {
        let ids: Vec<ParticleId> = self.particles.ids().collect();
        for generator in &mut self.contact_generators {
            generator.track(&ids);
        }
    }
}
