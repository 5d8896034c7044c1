//! This module contains the main game logic and state.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::Events;
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::constants::{CANVAS_SIZE, RAW_BOARD};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, SessionEvent};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::map::items::ItemLayer;
use crate::systems::{
    ghost_collision_system, ghost_movement_system, ghost_speed, item_system, player_movement_system, player_speed,
    power_timer_system, render_system, speed_scaling_system, Difficulty, DrawList, FrameTimestamp, GameStage, Ghost,
    GhostBundle, GhostMode, GhostRng, GlobalState, PlayerBundle, PlayerControlled, Position, PowerTimer, ScoreResource,
    SimulationClock, SurfaceSize, Velocity,
};

/// Events produced by a single frame. Rarely more than a couple.
pub type FrameEvents = SmallVec<[SessionEvent; 4]>;

/// The `Game` struct is the main entry point for the game.
///
/// It owns the world and the per-frame schedule, and exposes the session lifecycle:
/// [`Game::start`] begins a session, [`Game::tick`] simulates and renders one frame.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    /// Events raised outside the schedule, returned by the next tick.
    pending: FrameEvents,
}

impl Game {
    /// Creates an idle game with an OS-seeded ghost RNG.
    pub fn new(difficulty: Difficulty) -> GameResult<Game> {
        Self::build(difficulty, SmallRng::from_os_rng())
    }

    /// Creates an idle game whose frightened ghosts replay identically for the same seed.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> GameResult<Game> {
        Self::build(difficulty, SmallRng::seed_from_u64(seed))
    }

    fn build(difficulty: Difficulty, rng: SmallRng) -> GameResult<Game> {
        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        let map = Map::new(&RAW_BOARD)?;

        world.init_resource::<Events<SessionEvent>>();
        world.insert_resource(ItemLayer::from_map(&map));
        world.insert_resource(map);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(GameStage::Idle);
        world.insert_resource(difficulty);
        world.insert_resource(ScoreResource::default());
        world.insert_resource(PowerTimer::default());
        world.insert_resource(SimulationClock::default());
        world.insert_resource(FrameTimestamp::default());
        world.insert_resource(GhostRng(rng));
        world.insert_resource(SurfaceSize(CANVAS_SIZE.as_vec2()));
        world.insert_resource(DrawList::default());

        schedule.add_systems(
            (
                speed_scaling_system,
                player_movement_system,
                item_system,
                power_timer_system,
                ghost_movement_system,
                ghost_collision_system,
                render_system,
            )
                .chain(),
        );

        let mut game = Game {
            world,
            schedule,
            pending: FrameEvents::new(),
        };
        game.spawn_entities();

        Ok(game)
    }

    fn spawn_entities(&mut self) {
        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Position>>()
            .iter(&self.world)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
        }

        let difficulty = *self.world.resource::<Difficulty>();
        self.world.spawn(PlayerBundle::new(player_speed(1.0)));
        for ghost in Ghost::ALL {
            self.world
                .spawn(GhostBundle::new(ghost, ghost_speed(ghost, GhostMode::Scatter, difficulty, 1.0)));
        }
    }

    /// Starts a fresh session, resetting score, items, entities, clock, and power timer.
    pub fn start(&mut self) {
        let items = ItemLayer::from_map(self.world.resource::<Map>());
        self.world.insert_resource(items);
        self.world.insert_resource(ScoreResource::default());
        self.world.insert_resource(PowerTimer::default());
        self.world.insert_resource(SimulationClock::default());
        self.world.resource_mut::<Events<SessionEvent>>().clear();
        self.spawn_entities();
        self.world.insert_resource(GameStage::Playing);

        self.pending.clear();
        self.pending.push(SessionEvent::ScoreChanged(0));

        debug!(difficulty = %self.difficulty(), "Session started");
    }

    /// Simulates and renders one frame at host time `now_ms`.
    ///
    /// Returns the session events raised since the previous tick, in order. Outside of a
    /// running session only the draw list is refreshed.
    pub fn tick(&mut self, now_ms: f64) -> FrameEvents {
        self.world.insert_resource(FrameTimestamp(now_ms));
        self.schedule.run(&mut self.world);

        let mut events = std::mem::take(&mut self.pending);
        events.extend(self.world.resource_mut::<Events<SessionEvent>>().drain());
        events
    }

    /// Queues a turn for the player, committed at the next tile center where it is legal.
    pub fn queue_direction(&mut self, direction: Direction) {
        let mut query = self.world.query_filtered::<&mut Velocity, With<PlayerControlled>>();
        for mut velocity in query.iter_mut(&mut self.world) {
            velocity.next_direction = Some(direction);
        }
    }

    pub fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::Exit => {
                info!("Exit requested");
                self.world.resource_mut::<GlobalState>().exit = true;
            }
            GameCommand::MovePlayer(direction) => self.queue_direction(direction),
            GameCommand::StartGame => self.start(),
            GameCommand::SetDifficulty(difficulty) => {
                if let Err(e) = self.set_difficulty(difficulty) {
                    warn!("{e}");
                }
            }
        }
    }

    /// Changes the difficulty. Refused while a session is running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> GameResult<()> {
        if self.stage().is_playing() {
            return Err(GameError::InvalidState(format!(
                "Cannot change difficulty to {difficulty} during a session"
            )));
        }

        self.world.insert_resource(difficulty);
        let mut query = self.world.query::<(&Ghost, &GhostMode, &mut Velocity)>();
        for (ghost, mode, mut velocity) in query.iter_mut(&mut self.world) {
            velocity.speed = ghost_speed(*ghost, *mode, difficulty, 1.0);
        }

        debug!(%difficulty, "Difficulty changed");
        Ok(())
    }

    /// Sets the size of the drawing surface, in pixels.
    pub fn resize(&mut self, surface: Vec2) {
        self.world.insert_resource(SurfaceSize(surface));
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn difficulty(&self) -> Difficulty {
        *self.world.resource::<Difficulty>()
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.world.resource::<SimulationClock>().multiplier
    }

    pub fn remaining_items(&self) -> usize {
        self.world.resource::<ItemLayer>().remaining()
    }

    /// The drawing produced by the last tick.
    pub fn draw_list(&self) -> &DrawList {
        self.world.resource::<DrawList>()
    }

    pub fn exit_requested(&self) -> bool {
        self.world.resource::<GlobalState>().exit
    }
}
