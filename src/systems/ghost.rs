use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use glam::{IVec2, Vec2};
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::ghost::{BASE_SPEED, FRIGHTENED_SPEED, SPEED_DIVISOR, SPEED_STEP};
use crate::constants::movement::TURN_TOLERANCE;
use crate::map::builder::{nearest_tile, round_half_up, Map};
use crate::map::direction::Direction;
use crate::systems::components::{
    Difficulty, GameStage, Ghost, GhostMode, GhostRng, PlayerControlled, Position, ScatterTarget, Velocity,
};
use crate::systems::movement::advance;

/// Speed of a ghost for its mode, the session difficulty, and the global multiplier.
pub fn ghost_speed(ghost: Ghost, mode: GhostMode, difficulty: Difficulty, multiplier: f32) -> f32 {
    match mode {
        GhostMode::Frightened => FRIGHTENED_SPEED * multiplier,
        GhostMode::Chase | GhostMode::Scatter => {
            ((BASE_SPEED + ghost.id() as f32 * SPEED_STEP) / SPEED_DIVISOR) * difficulty.speed_multiplier() * multiplier
        }
    }
}

/// The tile a ghost steers towards.
pub fn target_for(mode: GhostMode, scatter: Vec2, player: Vec2) -> Vec2 {
    match mode {
        GhostMode::Chase => player,
        GhostMode::Scatter | GhostMode::Frightened => scatter,
    }
}

/// Whether both coordinates sit within tolerance of a tile center.
pub fn is_decision_point(position: Vec2) -> bool {
    (position.x - round_half_up(position.x)).abs() < TURN_TOLERANCE
        && (position.y - round_half_up(position.y)).abs() < TURN_TOLERANCE
}

/// Picks a ghost's next direction at `tile`, or `None` to keep going.
///
/// Directions are evaluated as Up, Down, Left, Right; walls are skipped, and so is the
/// reverse of `current` unless frightened. Normal ghosts take the neighbor closest to
/// `target`, keeping the earliest on ties. Frightened ghosts flip `coin` once per open
/// neighbor and take the last one that came up true.
pub fn choose_direction(
    map: &Map,
    tile: IVec2,
    current: Option<Direction>,
    mode: GhostMode,
    target: Vec2,
    mut coin: impl FnMut() -> bool,
) -> Option<Direction> {
    let frightened = mode == GhostMode::Frightened;
    let reverse = current.map(Direction::opposite);

    let mut best: Option<(Direction, f32)> = None;
    for direction in Direction::DIRECTIONS {
        if !frightened && reverse == Some(direction) {
            continue;
        }

        let neighbor = tile + direction.as_ivec2();
        if map.is_wall_cell(neighbor) {
            continue;
        }

        if frightened {
            if coin() {
                best = Some((direction, 0.0));
            }
            continue;
        }

        let distance = neighbor.as_vec2().distance(target);
        if best.is_none_or(|(_, shortest)| distance < shortest) {
            best = Some((direction, distance));
        }
    }

    best.map(|(direction, _)| direction)
}

/// Steers every ghost at a decision point, then moves it along its lane.
///
/// Ghosts are processed in id order so a seeded [`GhostRng`] replays identically.
pub fn ghost_movement_system(
    stage: Res<GameStage>,
    map: Res<Map>,
    mut rng: ResMut<GhostRng>,
    player: Query<&Position, With<PlayerControlled>>,
    mut ghosts: Query<(Entity, &Ghost, &GhostMode, &ScatterTarget, &mut Position, &mut Velocity), Without<PlayerControlled>>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(player) = player.single() else {
        return;
    };
    let player = player.0;

    let mut order: SmallVec<[(u8, Entity); 4]> = ghosts.iter().map(|(entity, ghost, ..)| (ghost.id(), entity)).collect();
    order.sort_unstable_by_key(|(id, _)| *id);

    for (_, entity) in order {
        let Ok((_, ghost, mode, scatter, mut position, mut velocity)) = ghosts.get_mut(entity) else {
            continue;
        };

        if is_decision_point(position.0) {
            let target = target_for(*mode, scatter.0, player);
            let generator = &mut rng.0;
            let choice = choose_direction(&map, nearest_tile(position.0), velocity.direction, *mode, target, || {
                generator.random_bool(0.5)
            });

            if let Some(direction) = choice.filter(|direction| velocity.direction != Some(*direction)) {
                trace!(ghost = %ghost, direction = direction.as_ref(), ?mode, "Ghost turned");
                velocity.direction = Some(direction);
            }
        }

        if let Some(direction) = velocity.direction {
            advance(&map, &mut position.0, direction, velocity.speed);
        }
    }
}
