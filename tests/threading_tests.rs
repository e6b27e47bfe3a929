use particle_contacts::ParticleWorld;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_particle_world_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<ParticleWorld>();
}

#[test]
fn test_locked_world_can_be_stepped_from_threads() {
    let mut world = ParticleWorld::default();
    world.set_running(true);
    let world = Arc::new(Mutex::new(world));

    let mut handles = vec![];
    for _ in 0..4 {
        let world_clone = Arc::clone(&world);
        let handle = thread::spawn(move || {
            let mut world = world_clone.lock().unwrap();
            world.step(1.0 / 60.0);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let world = world.lock().unwrap();
    assert!((world.elapsed() - 4.0 / 60.0).abs() < 1e-5);
}
