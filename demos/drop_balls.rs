use particle_contacts::*;

fn main() {
    let mut world = ParticleWorld::default();
    world.set_running(true);

    for frame in 0..600 {
        world.step_frame(1.0 / 60.0);
        if frame % 120 == 0 {
            let lowest = world
                .particles()
                .map(|(_, p)| p.position.y - p.radius())
                .fold(f32::INFINITY, f32::min);
            println!(
                "t = {:.2}s, lowest surface = {:.4}, contacts resolved = {}",
                world.elapsed(),
                lowest,
                world.last_resolution().contacts
            );
        }
    }

    for view in world.render_views() {
        println!("{:?} at {:?} (r = {:.2})", view.id, view.position, view.radius);
    }
}
