use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use particle_contacts::*;
use std::hint::black_box;

const DT: f32 = 1.0 / 60.0;

fn prepare_world(particle_count: usize) -> ParticleWorld {
    let config = SimulationConfig {
        particle_count,
        ..SimulationConfig::default()
    };
    let mut world = ParticleWorld::new(config).expect("valid config");
    world.set_running(true);
    world
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for &count in &[10usize, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut world = prepare_world(count);
            b.iter(|| world.step(black_box(DT)))
        });
    }
    group.finish();
}

fn bench_stacked_resolution(c: &mut Criterion) {
    c.bench_function("resolve_stack_of_8", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let ids: Vec<ParticleId> = (0..8)
                .map(|i| {
                    arena.insert(
                        Particle::new(Vec3::new(0.0, 0.45 + i as f32 * 0.9, 0.0), 0.5, 1.0)
                            .with_velocity(Vec3::new(0.0, -1.0, 0.0)),
                    )
                })
                .collect();
            let mut ground = GroundContactGenerator::new(0.0, 0.6);
            ground.track(&ids);
            let mut pairs = ParticleParticleContactGenerator::new(0.8);
            pairs.track(&ids);

            let mut registry = ContactRegistry::new();
            ground.generate(&arena, &mut registry);
            pairs.generate(&arena, &mut registry);
            black_box(registry.resolve(&mut arena, DT))
        })
    });
}

criterion_group!(benches, bench_world_step, bench_stacked_resolution);
criterion_main!(benches);
