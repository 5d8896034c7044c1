#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use budget_run::{
    constants::RAW_BOARD,
    events::SessionEvent,
    map::{builder::Map, direction::Direction, items::ItemLayer},
    systems::{
        ghost_speed, player_speed, Difficulty, DrawList, FrameTimestamp, GameStage, Ghost, GhostBundle, GhostMode,
        GhostRng, PlayerBundle, Position, PowerTimer, ScoreResource, SimulationClock, SurfaceSize, Velocity,
    },
};
use glam::Vec2;
use rand::{rngs::SmallRng, SeedableRng};

pub const TEST_SEED: u64 = 42;

/// A world holding every resource the systems read, with a session already running.
pub fn create_test_world() -> World {
    let mut world = World::new();
    let map = Map::new(&RAW_BOARD).expect("board should parse");

    world.init_resource::<Events<SessionEvent>>();
    world.insert_resource(ItemLayer::from_map(&map));
    world.insert_resource(map);
    world.insert_resource(GameStage::Playing);
    world.insert_resource(Difficulty::Normal);
    world.insert_resource(ScoreResource::default());
    world.insert_resource(PowerTimer::default());
    world.insert_resource(SimulationClock::default());
    world.insert_resource(FrameTimestamp::default());
    world.insert_resource(GhostRng(SmallRng::seed_from_u64(TEST_SEED)));
    world.insert_resource(SurfaceSize(Vec2::new(672.0, 640.0)));
    world.insert_resource(DrawList::default());

    world
}

pub fn spawn_player(world: &mut World, position: Vec2, direction: Option<Direction>) -> Entity {
    let mut bundle = PlayerBundle::new(player_speed(1.0));
    bundle.position = Position(position);
    bundle.velocity.direction = direction;
    world.spawn(bundle).id()
}

pub fn spawn_ghost(world: &mut World, ghost: Ghost, position: Vec2, mode: GhostMode, direction: Direction) -> Entity {
    let difficulty = *world.resource::<Difficulty>();
    let mut bundle = GhostBundle::new(ghost, ghost_speed(ghost, mode, difficulty, 1.0));
    bundle.mode = mode;
    bundle.position = Position(position);
    bundle.velocity.direction = Some(direction);
    world.spawn(bundle).id()
}

pub fn position(world: &World, entity: Entity) -> Vec2 {
    world.get::<Position>(entity).expect("entity should have a position").0
}

pub fn velocity(world: &World, entity: Entity) -> Velocity {
    *world.get::<Velocity>(entity).expect("entity should have a velocity")
}

pub fn drain_events(world: &mut World) -> Vec<SessionEvent> {
    world.resource_mut::<Events<SessionEvent>>().drain().collect()
}

pub fn assert_close(actual: Vec2, expected: Vec2) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected:?}, got {actual:?}"
    );
}
