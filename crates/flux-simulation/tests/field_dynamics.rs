//! Behavioral tests for the particle field: convergence, resize and recolor
//! invariants, gesture force directions, determinism.

use flux_physics::{
    ColorTheme, HandInput, DAMPING, GHOST_COUNT, INTERACTION_RADIUS, PINCH_ATTRACT_SCALE,
    POINTS_PER_PARTICLE,
};
use flux_simulation::{FieldConfiguration, ParticleField};
use glam::Vec3;

fn config(count: usize, strength: f32, idle_speed: f32) -> FieldConfiguration {
    FieldConfiguration {
        particle_count: count,
        interaction_strength: strength,
        idle_speed,
        ..Default::default()
    }
}

fn single_particle(strength: f32) -> ParticleField {
    ParticleField::from_anchors(config(1, strength, 0.0), vec![Vec3::ZERO]).unwrap()
}

#[test]
fn pinch_scenario_from_rest() {
    let mut field = single_particle(1.5);
    let hand = HandInput::pinching(Vec3::new(5.0, 0.0, 0.0));

    field.update(&[hand], 1.0 / 60.0);

    let expected = (1.0 - 5.0 / INTERACTION_RADIUS) * 1.5 * 10.0 * PINCH_ATTRACT_SCALE * DAMPING;
    let v = field.velocities()[0];
    assert!(v.x > 0.0, "pulled toward the hand at +x");
    assert!((v.x - expected).abs() < 1e-4, "v.x = {}, expected {expected}", v.x);
    assert_eq!(v.y, 0.0);
    assert_eq!(v.z, 0.0);

    // Head moved by exactly one velocity
    assert_eq!(field.head_position(0), Vec3::ZERO + v);
}

#[test]
fn pinch_attracts_from_any_direction() {
    let hand_position = Vec3::new(-4.0, 6.0, 1.0);
    let mut field = single_particle(1.0);
    let head = field.head_position(0);
    field.update(&[HandInput::pinching(hand_position)], 0.016);

    let delta_v = field.velocities()[0];
    assert!(delta_v.dot(hand_position - head) > 0.0);
}

#[test]
fn open_hand_repels() {
    let hand_position = Vec3::new(2.0, -3.0, 0.0);
    let mut field = single_particle(1.0);
    let head = field.head_position(0);
    field.update(&[HandInput::open(hand_position)], 0.016);

    let delta_v = field.velocities()[0];
    assert!(delta_v.dot(head - hand_position) > 0.0);
}

#[test]
fn neutral_and_distant_hands_do_nothing() {
    let mut field = single_particle(2.0);
    let neutral = HandInput::new(Vec3::new(1.0, 1.0, 0.0), false, false);
    let distant = HandInput::pinching(Vec3::new(0.0, INTERACTION_RADIUS * 2.0, 0.0));
    field.update(&[neutral, distant], 0.016);
    assert_eq!(field.velocities()[0], Vec3::ZERO);
    assert_eq!(field.head_position(0), Vec3::ZERO);
}

#[test]
fn displaced_particle_settles_on_anchor() {
    let mut field = single_particle(1.5);
    let push = HandInput::open(Vec3::new(-3.0, 1.0, 0.0));
    for _ in 0..3 {
        field.update(&[push], 0.016);
    }
    let initial = field.head_position(0).length();
    assert!(initial > 1.0);

    // The spring is underdamped, so compare peaks over windows longer than
    // one oscillation period rather than frame to frame.
    let window = 40;
    let mut previous_peak = f32::INFINITY;
    for _ in 0..15 {
        let mut peak = 0.0f32;
        for _ in 0..window {
            field.update(&[], 0.016);
            peak = peak.max(field.head_position(0).length());
        }
        assert!(peak <= previous_peak, "peak grew: {peak} > {previous_peak}");
        previous_peak = peak;
    }

    assert!(field.head_position(0).length() < 1e-3);
    assert!(field.velocities()[0].length() < 1e-3);
}

#[test]
fn resize_reinitializes_everything() {
    let mut field = ParticleField::with_seed(config(100, 1.5, 0.5), 11).unwrap();
    let hand = HandInput::open(Vec3::ZERO);
    for _ in 0..10 {
        field.update(&[hand], 0.016);
    }

    let resized = config(37, 1.5, 0.5);
    field.apply_configuration(&resized).unwrap();

    assert_eq!(field.count(), 37);
    assert_eq!(field.point_count(), 37 * (1 + GHOST_COUNT));
    assert_eq!(field.positions().len(), 37 * POINTS_PER_PARTICLE);
    assert_eq!(field.colors().len(), 37 * POINTS_PER_PARTICLE);
    assert_eq!(field.opacities().len(), 37 * POINTS_PER_PARTICLE);
    assert_eq!(field.velocities().len(), 37);

    for (i, anchor) in field.anchors().iter().enumerate() {
        for segment in field.trail(i) {
            assert_eq!(*segment, anchor.to_array());
        }
        assert_eq!(field.velocities()[i], Vec3::ZERO);
    }

    for trail in field.opacities().chunks_exact(POINTS_PER_PARTICLE) {
        assert_eq!(trail[0], 1.0);
        assert!((trail[GHOST_COUNT] - 0.7f32.powi(GHOST_COUNT as i32)).abs() < 1e-6);
    }

    assert!(field.take_changes().opacities);
}

#[test]
fn same_count_does_not_reallocate() {
    let mut field = ParticleField::with_seed(config(20, 1.5, 0.5), 5).unwrap();
    let anchors = field.anchors().to_vec();
    field
        .apply_configuration(&FieldConfiguration {
            particle_size: 0.5,
            ..config(20, 3.0, 1.0)
        })
        .unwrap();
    assert_eq!(field.anchors(), anchors.as_slice());
    assert!((field.point_size() - 1.4).abs() < 1e-6);
}

#[test]
fn recolor_keeps_positions_and_velocities() {
    let mut field = ParticleField::with_seed(config(50, 1.5, 0.8), 3).unwrap();
    let hand = HandInput::pinching(Vec3::new(1.0, 2.0, 0.0));
    for _ in 0..5 {
        field.update(&[hand], 0.016);
    }
    field.take_changes();

    let positions = field.positions().to_vec();
    let velocities = field.velocities().to_vec();
    let colors = field.colors().to_vec();

    let sunset = FieldConfiguration {
        color_theme: ColorTheme::Sunset,
        ..config(50, 1.5, 0.8)
    };
    field.apply_configuration(&sunset).unwrap();

    assert_eq!(field.positions(), positions.as_slice());
    assert_eq!(field.velocities(), velocities.as_slice());
    assert_ne!(field.colors(), colors.as_slice());

    let changes = field.take_changes();
    assert!(changes.colors);
    assert!(!changes.positions);

    for (i, trail) in field.colors().chunks_exact(POINTS_PER_PARTICLE).enumerate() {
        let expected = ColorTheme::Sunset.particle_color(i, 50);
        assert!(trail.iter().all(|c| *c == expected));
    }
}

#[test]
fn resize_and_recolor_in_one_snapshot() {
    let mut field = ParticleField::with_seed(config(10, 1.5, 0.5), 8).unwrap();
    let next = FieldConfiguration {
        color_theme: ColorTheme::Nature,
        ..config(12, 1.5, 0.5)
    };
    field.step(&next, &[], 0.016).unwrap();

    assert_eq!(field.count(), 12);
    assert_eq!(field.configuration().color_theme, ColorTheme::Nature);
    assert_eq!(field.colors()[0], ColorTheme::Nature.particle_color(0, 12));
    let last = field.point_count() - 1;
    assert_eq!(field.colors()[last], ColorTheme::Nature.particle_color(11, 12));
}

#[test]
fn seeded_runs_are_identical() {
    let run = || {
        let mut field = ParticleField::with_seed(config(200, 1.5, 0.5), 42).unwrap();
        let hands = [
            HandInput::pinching(Vec3::new(4.0, -2.0, 0.0)),
            HandInput::open(Vec3::new(-10.0, 5.0, 0.0)),
        ];
        for frame in 0..60 {
            let active = if frame % 20 < 10 { &hands[..] } else { &[][..] };
            field.update(active, 1.0 / 60.0);
        }
        field.positions().to_vec()
    };

    assert_eq!(run(), run());
}

#[test]
fn idle_drift_keeps_particles_moving_without_hands() {
    let mut field = ParticleField::with_seed(config(30, 1.5, 0.5), 9).unwrap();
    let start = field.positions().to_vec();
    for _ in 0..30 {
        field.update(&[], 1.0 / 60.0);
    }
    assert_ne!(field.positions(), start.as_slice());
    for (head, anchor) in field
        .positions()
        .chunks_exact(POINTS_PER_PARTICLE)
        .zip(field.anchors())
    {
        // Drift is bounded by the spring
        assert!((Vec3::from_array(head[0]) - *anchor).length() < 5.0);
    }
}
