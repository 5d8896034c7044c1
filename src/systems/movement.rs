//! Grid movement with sub-tile interpolation and queued turns.

use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res};
use glam::Vec2;
use tracing::trace;

use crate::constants::movement::{PLAYER_BASE_SPEED, TURN_TOLERANCE};
use crate::map::builder::{nearest_tile, round_half_up, Map};
use crate::map::direction::Direction;
use crate::systems::components::{GameStage, PlayerControlled, Position, Velocity};

/// Player speed for a given global multiplier.
pub fn player_speed(multiplier: f32) -> f32 {
    PLAYER_BASE_SPEED * multiplier
}

/// Offset of `position` from the center of its nearest tile, per axis.
fn center_offset(position: Vec2) -> Vec2 {
    let center = Vec2::new(round_half_up(position.x), round_half_up(position.y));
    (position - center).abs()
}

/// Whether an entity at `position` may move one step in `direction`.
///
/// Between tile centers only movement along the current lane is allowed, which makes
/// reversing always legal. At a tile center the neighboring tile must not be a wall.
pub fn can_move(map: &Map, position: Vec2, direction: Direction) -> bool {
    let offset = center_offset(position);

    if offset.x > TURN_TOLERANCE || offset.y > TURN_TOLERANCE {
        return if direction.is_vertical() {
            offset.x < TURN_TOLERANCE
        } else {
            offset.y < TURN_TOLERANCE
        };
    }

    map.is_open(nearest_tile(position), direction)
}

/// Moves `position` by `speed` along `direction` if allowed, wrapping horizontally.
///
/// Returns whether the entity moved.
pub fn advance(map: &Map, position: &mut Vec2, direction: Direction, speed: f32) -> bool {
    if !can_move(map, *position, direction) {
        return false;
    }

    *position += direction.as_vec2() * speed;

    let columns = map.columns() as f32;
    if position.x < 0.0 {
        position.x = columns - 1.0;
    } else if position.x >= columns {
        position.x = 0.0;
    }

    true
}

/// One frame of player-style movement: commit the queued turn when legal, then advance.
///
/// Committing a turn snaps the entity to the center of its nearest tile.
pub fn step_entity(map: &Map, position: &mut Vec2, velocity: &mut Velocity) -> bool {
    if let Some(next) = velocity.next_direction {
        if can_move(map, *position, next) {
            velocity.direction = Some(next);
            velocity.next_direction = None;
            *position = nearest_tile(*position).as_vec2();
            trace!(direction = next.as_ref(), ?position, "Queued turn committed");
        }
    }

    match velocity.direction {
        Some(direction) => advance(map, position, direction, velocity.speed),
        None => false,
    }
}

pub fn player_movement_system(
    stage: Res<GameStage>,
    map: Res<Map>,
    mut players: Query<(&mut Position, &mut Velocity), With<PlayerControlled>>,
) {
    if !stage.is_playing() {
        return;
    }

    for (mut position, mut velocity) in players.iter_mut() {
        step_entity(&map, &mut position.0, &mut velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_center_offset() {
        let offset = center_offset(Vec2::new(3.25, 7.0));
        assert!((offset.x - 0.25).abs() < 1e-6);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_reverse_allowed_between_centers() {
        let map = Map::new(&RAW_BOARD).unwrap();
        let position = Vec2::new(3.5, 4.0);
        assert!(can_move(&map, position, Direction::Left));
        assert!(can_move(&map, position, Direction::Right));
        assert!(!can_move(&map, position, Direction::Up));
    }

    #[test]
    fn test_player_speed() {
        assert_eq!(player_speed(1.0), 0.03);
        assert!((player_speed(2.25) - 0.0675).abs() < 1e-6);
    }
}
