use bevy_ecs::system::RunSystemOnce;
use budget_run::map::direction::Direction;
use budget_run::systems::{
    speed_scaling_system, Difficulty, FrameTimestamp, GameStage, Ghost, GhostMode, SimulationClock,
};
use glam::Vec2;
use speculoos::prelude::*;

mod common;

fn run_at(world: &mut bevy_ecs::world::World, now_ms: f64) {
    world.insert_resource(FrameTimestamp(now_ms));
    world.run_system_once(speed_scaling_system).expect("System should run successfully");
}

#[test]
fn test_first_frame_starts_clock() {
    let mut world = common::create_test_world();
    run_at(&mut world, 12_345.0);

    let clock = *world.resource::<SimulationClock>();
    assert_that(&clock.start_ms).is_equal_to(Some(12_345.0));
    assert_that(&clock.elapsed_ms).is_equal_to(0.0);
    assert_that(&clock.multiplier).is_equal_to(1.0);
    assert_that(&clock.frame).is_equal_to(1);
}

#[test]
fn test_speeds_rescale_when_stage_changes() {
    let mut world = common::create_test_world();
    let player = common::spawn_player(&mut world, Vec2::new(5.0, 4.0), Some(Direction::Right));
    let cfo = common::spawn_ghost(&mut world, Ghost::Cfo, Vec2::new(9.0, 9.0), GhostMode::Scatter, Direction::Left);
    let tax = common::spawn_ghost(&mut world, Ghost::Tax, Vec2::new(11.0, 9.0), GhostMode::Frightened, Direction::Right);

    run_at(&mut world, 1_000.0);
    run_at(&mut world, 30_999.0);
    assert_that(&world.resource::<SimulationClock>().multiplier).is_equal_to(1.0);

    run_at(&mut world, 31_000.0);
    assert_that(&world.resource::<SimulationClock>().multiplier).is_equal_to(1.5);

    let speeds = [player, cfo, tax].map(|entity| common::velocity(&world, entity).speed);
    let expected = [0.045, 0.024, 0.015];
    for (speed, expected) in speeds.iter().zip(expected) {
        assert!((speed - expected).abs() < 1e-6, "{speed} != {expected}");
    }
}

#[test]
fn test_difficulty_scales_ghosts_only() {
    let mut world = common::create_test_world();
    world.insert_resource(Difficulty::Hard);
    let player = common::spawn_player(&mut world, Vec2::new(5.0, 4.0), None);
    let ghost = common::spawn_ghost(&mut world, Ghost::Cfo, Vec2::new(9.0, 9.0), GhostMode::Chase, Direction::Left);

    run_at(&mut world, 0.0);
    run_at(&mut world, 60_000.0);

    let player_speed = common::velocity(&world, player).speed;
    let ghost_speed = common::velocity(&world, ghost).speed;
    assert!((player_speed - 0.03 * 2.25).abs() < 1e-6);
    assert!((ghost_speed - 0.016 * 1.3 * 2.25).abs() < 1e-6);
}

#[test]
fn test_multiplier_never_decreases() {
    let mut world = common::create_test_world();
    run_at(&mut world, 0.0);
    run_at(&mut world, 95_000.0);
    assert_that(&world.resource::<SimulationClock>().multiplier).is_equal_to(3.375);

    // A host clock that jumps backwards does not slow the session down
    run_at(&mut world, 10.0);
    assert_that(&world.resource::<SimulationClock>().multiplier).is_equal_to(3.375);

    run_at(&mut world, 10_000_000.0);
    assert_that(&world.resource::<SimulationClock>().multiplier).is_equal_to(5.0);
}

#[test]
fn test_clock_idle_when_not_playing() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Idle);
    run_at(&mut world, 50_000.0);

    assert_that(world.resource::<SimulationClock>()).is_equal_to(SimulationClock::default());
}
