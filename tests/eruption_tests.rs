//! End-to-end tests of the eruption simulation through the public API.
//!
//! These drive whole scenes frame by frame with fixed seeds and check the
//! properties that only show up across many frames: eruption timing,
//! conservation of particles, culling and what ends up on screen.

use volcano::prelude::*;
use volcano::{Bounds, ConfigError, Sprite};

// ============================================================================
// Helpers
// ============================================================================

fn fixed_config() -> SimulationConfig {
    SimulationConfig {
        randomness: false,
        seed: Some(1),
        ..Default::default()
    }
}

fn random_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

/// Frame index at which the first particles appear with the default cadence.
const FIRST_SPAWN_FRAME: u64 = 62;

// ============================================================================
// Eruption timing
// ============================================================================

#[test]
fn test_nothing_spawns_before_first_eruption() {
    let mut driver = FrameDriver::from_config(&fixed_config()).unwrap();
    for _ in 1..FIRST_SPAWN_FRAME {
        assert_eq!(driver.advance().spawned, 0);
    }
    let stats = driver.advance();
    assert_eq!(stats.frame, FIRST_SPAWN_FRAME);
    assert_eq!(stats.spawned, 3);
}

#[test]
fn test_first_eruption_spawns_ten_batches() {
    let config = fixed_config();
    let mut driver = FrameDriver::from_config(&config).unwrap();
    let total = driver.run(FIRST_SPAWN_FRAME + 18);

    assert_eq!(total.spawned, 30);
    assert_eq!(total.culled, 0);
    assert_eq!(total.live, 30);
    assert_eq!(driver.planet().eruptor().spawn_events(), 10);
    assert_eq!(driver.planet().eruptor().phase(), EruptionPhase::Active);

    // The next frame closes the eruption without spawning.
    assert_eq!(driver.advance().spawned, 0);
    assert_eq!(driver.planet().eruptor().phase(), EruptionPhase::Cooldown);
    assert_eq!(driver.planet().eruptor().spawn_events(), 10);
}

#[test]
fn test_eruptions_repeat_every_cycle() {
    let config = fixed_config();
    let mut driver = FrameDriver::from_config(&config).unwrap();
    let cycle = driver.planet().eruptor().cadence().cycle_len() as u64;

    let mut spawn_frames = Vec::new();
    for _ in 0..(FIRST_SPAWN_FRAME + 3 * cycle) {
        let stats = driver.advance();
        if stats.spawned > 0 {
            spawn_frames.push(stats.frame);
        }
    }

    let starts: Vec<u64> = spawn_frames
        .windows(2)
        .filter(|w| w[1] - w[0] > config.frequency as u64)
        .map(|w| w[1])
        .collect();
    assert_eq!(spawn_frames[0], FIRST_SPAWN_FRAME);
    assert_eq!(
        starts,
        vec![
            FIRST_SPAWN_FRAME + cycle,
            FIRST_SPAWN_FRAME + 2 * cycle,
            FIRST_SPAWN_FRAME + 3 * cycle,
        ]
    );
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_particles_are_conserved() {
    let mut driver = FrameDriver::from_config(&random_config(3)).unwrap();
    let mut spawned = 0;
    let mut culled = 0;
    for _ in 0..1_000 {
        let stats = driver.advance();
        spawned += stats.spawned;
        culled += stats.culled;
        assert_eq!(spawned - culled, stats.live);
    }
    assert!(culled > 0);
}

#[test]
fn test_cull_removes_exactly_the_escaped() {
    let mut driver = FrameDriver::from_config(&random_config(5)).unwrap();
    for _ in 0..600 {
        let escaped = driver
            .planet()
            .eruptor()
            .particles()
            .iter()
            .filter(|p| Bounds::UNIT.is_outside(p.position()))
            .count();
        let stats = driver.advance();
        assert_eq!(stats.culled, escaped);
    }
}

#[test]
fn test_particles_launch_within_angle_spread() {
    let config = SimulationConfig {
        gravity: DVec2::ZERO,
        ..random_config(8)
    };
    let mut driver = FrameDriver::from_config(&config).unwrap();
    driver.run(FIRST_SPAWN_FRAME + 19);

    let limit = config.angle_spread.to_radians() + 1e-6;
    let particles = driver.planet().eruptor().particles();
    assert_eq!(particles.len(), 30);
    for p in particles {
        let v = p.velocity();
        assert!(v.y > 0.0);
        assert!(v.x.atan2(v.y).abs() <= limit);
        let speed = v.length();
        assert!(speed <= config.default_velocity + config.velocity_spread + 1e-6);
        assert!(speed >= config.default_velocity - config.velocity_spread - 1e-6);
    }
}

#[test]
fn test_same_seed_same_scene() {
    let mut a = FrameDriver::from_config(&random_config(42)).unwrap();
    let mut b = FrameDriver::from_config(&random_config(42)).unwrap();
    a.run(400);
    b.run(400);
    assert_eq!(a.planet().eruptor().particles(), b.planet().eruptor().particles());
}

// ============================================================================
// Scene and rendering
// ============================================================================

#[test]
fn test_draw_list_is_planet_then_particles() {
    let config = fixed_config();
    let mut driver = FrameDriver::from_config(&config).unwrap();
    driver.run(FIRST_SPAWN_FRAME + 5);

    let planet = driver.planet();
    let sprites: Vec<Sprite> = planet.draw_list();
    assert_eq!(sprites.len(), 1 + planet.eruptor().particles().len());
    assert_eq!(sprites[0].rect, planet.planet_rect());
    assert_eq!(sprites[0].color, config.planet_color);
    assert!(sprites[1..].iter().all(|s| s.color == config.particle_color));
}

#[test]
fn test_headless_render_shows_particles() {
    let config = SimulationConfig {
        window_size: UVec2::new(200, 100),
        ..fixed_config()
    };
    let mut driver = FrameDriver::from_config(&config).unwrap();
    let mut canvas = Canvas::for_planet(driver.planet());

    canvas.draw(driver.planet());
    let count = |canvas: &Canvas, color: [u8; 3]| {
        canvas
            .image()
            .pixels()
            .filter(|p| p.0[..3] == color)
            .count()
    };
    assert_eq!(count(&canvas, config.particle_color), 0);
    assert_eq!(count(&canvas, config.planet_color), 160 * 20);

    driver.run(FIRST_SPAWN_FRAME + 10);
    canvas.draw(driver.planet());
    assert!(count(&canvas, config.particle_color) > 0);
    assert_eq!(canvas.pixel(0, 0), Some(config.background_color));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_drives_simulation() {
    let json = r#"{
        "window_size": [400, 300],
        "randomness": false,
        "downtime": 0,
        "duration": 4,
        "frequency": 1,
        "concurrent_expulsions": 2
    }"#;
    let config = SimulationConfig::from_json(json).unwrap();
    let mut driver = FrameDriver::from_config(&config).unwrap();

    // Frame 1 starts the eruption, frames 2..=5 spawn.
    let spawned: Vec<usize> = (0..6).map(|_| driver.advance().spawned).collect();
    assert_eq!(spawned, vec![0, 2, 2, 2, 2, 0]);
}

#[test]
fn test_unsupported_angle_in_config() {
    let result = SimulationConfig::from_json(r#"{ "angle_spread": 95.0 }"#);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid(EruptionError::UnsupportedAngle(a))) if a == 95.0
    ));
}

#[test]
fn test_short_vector_in_config() {
    let result = SimulationConfig::from_json(r#"{ "particle_size": [0.01] }"#);
    assert!(matches!(result, Err(ConfigError::Json(_))));
}
