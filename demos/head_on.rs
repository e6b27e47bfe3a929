use particle_contacts::*;

fn main() {
    let mut world = ParticleWorld::empty(SimulationConfig {
        damping: 1.0,
        ..SimulationConfig::default()
    })
    .expect("default config is valid");

    let left = world.add_particle(
        Particle::new(Vec3::new(-2.0, 5.0, 0.0), 0.5, 1.0)
            .with_velocity(Vec3::new(1.0, 0.0, 0.0))
            .with_damping(1.0),
    );
    let right = world.add_particle(
        Particle::new(Vec3::new(2.0, 5.0, 0.0), 0.5, 3.0)
            .with_velocity(Vec3::new(-1.0, 0.0, 0.0))
            .with_damping(1.0),
    );

    world.set_running(true);
    for _ in 0..240 {
        world.step(1.0 / 60.0);
    }

    for id in [left, right] {
        if let Some(particle) = world.particle(id) {
            println!(
                "{:?}: velocity {:?}, momentum {:?}",
                id,
                particle.velocity,
                particle.momentum()
            );
        }
    }
}
