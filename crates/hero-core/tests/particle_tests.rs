// Host-side tests for the clover rain simulation.

use glam::{Vec2, Vec3};
use hero_core::constants::*;
use hero_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

fn seeded_rain(count: usize, visible: Vec2) -> ParticleRain {
    ParticleRain::spawn(count, visible, StdRng::seed_from_u64(7))
}

fn particle(x: f32, y: f32, fall_speed: f32, rotation_speed: f32) -> Particle {
    Particle {
        position: Vec3::new(x, y, CLOVER_Z),
        fall_speed,
        rotation: 0.0,
        rotation_speed,
    }
}

#[test]
fn spawn_scatters_above_the_top_edge() {
    let visible = Vec2::new(3.2, 1.4);
    let rain = seeded_rain(CLOVER_COUNT, visible);
    assert_eq!(rain.len(), 40);
    for p in rain.particles() {
        assert!(p.position.x >= -1.6 && p.position.x < 1.6);
        assert!(p.position.y >= 0.7 && p.position.y < 2.1);
        assert_eq!(p.position.z, CLOVER_Z);
        assert!(p.fall_speed >= 0.001 && p.fall_speed < 0.003);
        assert!(p.rotation_speed >= -0.01 && p.rotation_speed < 0.01);
        assert!(p.rotation >= 0.0 && p.rotation < PI);
    }
}

#[test]
fn spawn_is_deterministic_for_a_seed() {
    let visible = Vec2::new(2.0, 2.0);
    let a = seeded_rain(10, visible);
    let b = seeded_rain(10, visible);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn instances_mirror_particle_transforms() {
    let rain = seeded_rain(5, Vec2::new(2.0, 2.0));
    assert_eq!(rain.instances().len(), 5);
    for (p, inst) in rain.particles().iter().zip(rain.instances()) {
        assert_eq!(inst.model, p.transform().to_cols_array_2d());
        // translation lives in the last column
        assert_eq!(inst.model[3][0], p.position.x);
        assert_eq!(inst.model[3][1], p.position.y);
    }
}

#[test]
fn tick_is_a_no_op_until_falling_is_enabled() {
    let mut rain = seeded_rain(CLOVER_COUNT, Vec2::new(2.0, 2.0));
    let before = rain.particles().to_vec();
    for _ in 0..100 {
        assert!(!rain.tick());
    }
    assert_eq!(rain.particles(), &before[..]);
    assert!(!rain.is_falling());
}

#[test]
fn falling_flag_is_monotonic() {
    let mut rain = seeded_rain(3, Vec2::new(2.0, 2.0));
    assert!(rain.enable_falling());
    assert!(!rain.enable_falling());
    for _ in 0..50 {
        assert!(rain.tick());
        assert!(rain.is_falling());
    }
}

#[test]
fn one_tick_moves_two_particles_by_their_speed() {
    let visible = Vec2::new(2.0, 2.0);
    let particles = vec![particle(-0.4, 1.3, 0.002, 0.005), particle(0.7, 2.6, 0.002, -0.003)];
    let mut rain = ParticleRain::with_particles(particles.clone(), visible, StdRng::seed_from_u64(1));
    assert!((rain.bottom_limit() + 2.0 / 1.5).abs() < 1e-6);

    rain.enable_falling();
    rain.tick();

    for (before, after) in particles.iter().zip(rain.particles()) {
        assert!((before.position.y - after.position.y - 0.002).abs() < 1e-6);
        assert_eq!(before.position.x, after.position.x);
        assert!((after.rotation - before.rotation_speed).abs() < 1e-7);
    }
}

#[test]
fn crossing_the_bottom_respawns_position_only() {
    let visible = Vec2::new(2.0, 3.0);
    let bottom = -3.0 / 1.5;
    let p = Particle {
        position: Vec3::new(0.9, bottom + 0.001, CLOVER_Z),
        fall_speed: 0.0025,
        rotation: 1.0,
        rotation_speed: 0.004,
    };
    let mut rain = ParticleRain::with_particles(vec![p], visible, StdRng::seed_from_u64(99));
    rain.enable_falling();
    rain.tick();

    let q = rain.particles()[0];
    assert!(q.position.y >= 1.5 && q.position.y < 2.0, "y = {}", q.position.y);
    assert!(q.position.x >= -1.0 && q.position.x < 1.0);
    assert_eq!(q.position.z, CLOVER_Z);
    assert_eq!(q.fall_speed, 0.0025);
    assert_eq!(q.rotation_speed, 0.004);
    assert!((q.rotation - 1.004).abs() < 1e-6);
}

#[test]
fn long_run_keeps_pool_and_respawn_invariants() {
    let visible = Vec2::new(1.8, 1.4);
    let mut rain = seeded_rain(CLOVER_COUNT, visible);
    rain.enable_falling();
    let half_w = visible.x / 2.0;
    let bottom = rain.bottom_limit();
    let instances_ptr = rain.instances().as_ptr();

    let mut respawns = 0;
    for _ in 0..5_000 {
        let before = rain.particles().to_vec();
        rain.tick();
        assert_eq!(rain.len(), CLOVER_COUNT);
        assert_eq!(rain.instances().as_ptr(), instances_ptr);
        for (b, a) in before.iter().zip(rain.particles()) {
            assert_eq!(a.fall_speed, b.fall_speed);
            assert_eq!(a.rotation_speed, b.rotation_speed);
            assert!(a.position.y >= bottom);
            if b.position.y - b.fall_speed < bottom {
                respawns += 1;
                assert!(a.position.y >= visible.y / 2.0);
                assert!(a.position.y < visible.y / 2.0 + RESPAWN_JITTER);
                assert!(a.position.x >= -half_w && a.position.x < half_w);
            }
        }
    }
    assert!(respawns > 0, "5000 ticks should wrap at least one clover");
}

#[test]
fn visible_area_tracks_camera_without_moving_sprites() {
    let mut rain = seeded_rain(4, Vec2::new(2.0, 2.0));
    let before = rain.particles().to_vec();
    rain.set_visible_area(Vec2::new(4.0, 6.0));
    assert_eq!(rain.visible_area(), Vec2::new(4.0, 6.0));
    assert!((rain.bottom_limit() + 4.0).abs() < 1e-6);
    assert_eq!(rain.particles(), &before[..]);
}
