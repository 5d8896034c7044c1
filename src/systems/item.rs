use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info, trace};

use crate::constants::scoring::{PELLET_POINTS, POWER_DURATION_TICKS, POWER_PELLET_POINTS};
use crate::constants::MapTile;
use crate::events::SessionEvent;
use crate::map::builder::nearest_tile;
use crate::map::items::ItemLayer;
use crate::systems::clock::SimulationClock;
use crate::systems::components::{
    Difficulty, GameStage, Ghost, GhostMode, PlayerControlled, Position, PowerTimer, ScoreResource, Velocity,
};
use crate::systems::ghost::ghost_speed;

/// Points awarded for collecting a tile's contents, if it holds anything.
pub fn item_points(tile: MapTile) -> Option<u32> {
    match tile {
        MapTile::Pellet => Some(PELLET_POINTS),
        MapTile::PowerPellet => Some(POWER_PELLET_POINTS),
        MapTile::Empty | MapTile::Wall => None,
    }
}

/// Collects whatever lies on the player's tile, then checks for a cleared board.
///
/// A power item frightens every ghost and restarts the power countdown. Clearing the
/// last item ends the session as a win.
#[allow(clippy::too_many_arguments)]
pub fn item_system(
    mut stage: ResMut<GameStage>,
    mut items: ResMut<ItemLayer>,
    mut score: ResMut<ScoreResource>,
    mut power: ResMut<PowerTimer>,
    clock: Res<SimulationClock>,
    difficulty: Res<Difficulty>,
    player: Query<&Position, With<PlayerControlled>>,
    mut ghosts: Query<(&Ghost, &mut GhostMode, &mut Velocity)>,
    mut events: EventWriter<SessionEvent>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(position) = player.single() else {
        return;
    };

    let cell = nearest_tile(position.0);
    let Some(tile) = items.consume(cell) else {
        return;
    };
    let Some(points) = item_points(tile) else {
        return;
    };

    score.0 += points;
    trace!(?cell, item = ?tile, points, score = score.0, "Item collected");
    events.write(SessionEvent::ScoreChanged(score.0));

    if tile == MapTile::PowerPellet {
        power.0 = POWER_DURATION_TICKS;
        for (ghost, mut mode, mut velocity) in ghosts.iter_mut() {
            *mode = GhostMode::Frightened;
            velocity.speed = ghost_speed(*ghost, *mode, *difficulty, clock.multiplier);
        }
        debug!(duration_ticks = POWER_DURATION_TICKS, "Power item collected, frightening ghosts");
    }

    if !items.has_items() {
        info!(score = score.0, frame = clock.frame, "Board cleared");
        *stage = GameStage::Won;
        events.write(SessionEvent::Won);
    }
}

/// Counts down the frightened phase; ghosts return to scatter when it runs out.
pub fn power_timer_system(
    stage: Res<GameStage>,
    mut power: ResMut<PowerTimer>,
    clock: Res<SimulationClock>,
    difficulty: Res<Difficulty>,
    mut ghosts: Query<(&Ghost, &mut GhostMode, &mut Velocity)>,
) {
    if !stage.is_playing() || power.0 == 0 {
        return;
    }

    power.0 -= 1;
    if power.0 == 0 {
        for (ghost, mut mode, mut velocity) in ghosts.iter_mut() {
            *mode = GhostMode::Scatter;
            velocity.speed = ghost_speed(*ghost, *mode, *difficulty, clock.multiplier);
        }
        debug!("Power phase ended, ghosts back to scatter");
    }
}
