use particle_contacts::*;

/// Vertical wall at `x = 0` keeping particles on the positive side.
struct WallGenerator {
    tracked: Vec<ParticleId>,
}

impl ContactGenerator for WallGenerator {
    fn name(&self) -> &'static str {
        "wall"
    }

    fn track(&mut self, particles: &[ParticleId]) {
        self.tracked = particles.to_vec();
    }

    fn generate(&self, particles: &Arena<Particle>, registry: &mut ContactRegistry) -> usize {
        let mut added = 0;
        for &id in &self.tracked {
            if let Some(particle) = particles.get(id) {
                let clearance = particle.position.x - particle.radius();
                if clearance < 0.0 {
                    registry.add(Contact::with_environment(id, Vec3::X, -clearance, 0.5));
                    added += 1;
                }
            }
        }
        added
    }
}

#[test]
fn overlapping_spawn_is_pushed_apart_in_one_tick() {
    let mut world = ParticleWorld::empty(SimulationConfig::default()).expect("valid config");
    let a = world.add_particle(Particle::new(Vec3::new(0.0, 5.0, 0.0), 0.5, 1.0));
    let b = world.add_particle(Particle::new(Vec3::new(0.6, 5.0, 0.0), 0.5, 1.0));

    let stats = world.tick(0.01);

    assert_eq!(stats.contacts, 1);
    assert!(stats.position_converged);
    let pa = world.particle(a).expect("a").position;
    let pb = world.particle(b).expect("b").position;
    assert!((pb - pa).length() >= 1.0 - 1e-5, "still overlapping: {}", (pb - pa).length());
    assert!(world.contacts().is_empty());
}

#[test]
fn coincident_particles_separate_along_fallback_axis() {
    let mut world = ParticleWorld::empty(SimulationConfig::default()).expect("valid config");
    let a = world.add_particle(Particle::new(Vec3::new(2.0, 5.0, 2.0), 0.5, 1.0));
    let b = world.add_particle(Particle::new(Vec3::new(2.0, 5.0, 2.0), 0.5, 1.0));

    world.tick(0.01);

    let pa = world.particle(a).expect("a").position;
    let pb = world.particle(b).expect("b").position;
    assert!(pa.is_finite() && pb.is_finite());
    assert!((pa.y - pb.y - 1.0).abs() < 1e-5);
    assert_eq!(pa.x, pb.x);
}

#[test]
fn profile_reports_tick_workload() {
    let mut world = ParticleWorld::empty(SimulationConfig::default()).expect("valid config");
    world.add_particle_with_gravity(Particle::new(Vec3::new(0.0, 0.4, 0.0), 0.5, 1.0));
    world.add_particle_with_gravity(Particle::new(Vec3::new(5.0, 5.0, 0.0), 0.5, 1.0));

    world.tick(0.01);

    let profile = world.last_profile();
    assert_eq!(profile.particle_count, 2);
    assert_eq!(profile.contact_count, 1);
    assert!(profile.velocity_iterations >= 1);
    assert_eq!(world.last_resolution().contacts, 1);
}

#[test]
fn custom_generators_take_part_in_resolution() {
    let mut world = ParticleWorld::empty(SimulationConfig::default()).expect("valid config");
    world.add_contact_generator(Box::new(WallGenerator { tracked: Vec::new() }));
    let id = world.add_particle(
        Particle::new(Vec3::new(0.3, 5.0, 0.0), 0.5, 1.0).with_velocity(Vec3::new(-2.0, 0.0, 0.0)),
    );

    world.tick(0.01);

    let particle = world.particle(id).expect("particle");
    assert!(particle.position.x >= 0.5 - 1e-5, "x = {}", particle.position.x);
    assert!(particle.velocity.x > 0.0);
}
