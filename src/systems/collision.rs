use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::constants::scoring::{COLLISION_DISTANCE, GHOST_POINTS};
use crate::constants::GHOST_HOUSE;
use crate::events::SessionEvent;
use crate::systems::clock::SimulationClock;
use crate::systems::components::{
    Difficulty, GameStage, Ghost, GhostMode, PlayerControlled, Position, ScoreResource, Velocity,
};
use crate::systems::ghost::ghost_speed;

/// Whether two positions are close enough to touch.
pub fn is_touching(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < COLLISION_DISTANCE
}

/// Resolves contact between the player and each ghost, in ghost id order.
///
/// A frightened ghost is sent back to the ghost house for a bonus. Any other ghost ends
/// the session, and no later ghost is checked that frame.
#[allow(clippy::too_many_arguments)]
pub fn ghost_collision_system(
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    clock: Res<SimulationClock>,
    difficulty: Res<Difficulty>,
    player: Query<&Position, With<PlayerControlled>>,
    mut ghosts: Query<(Entity, &Ghost, &mut GhostMode, &mut Position, &mut Velocity), Without<PlayerControlled>>,
    mut events: EventWriter<SessionEvent>,
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
        let Ok((_, ghost, mut mode, mut position, mut velocity)) = ghosts.get_mut(entity) else {
            continue;
        };
        if !is_touching(position.0, player) {
            continue;
        }

        if *mode == GhostMode::Frightened {
            position.0 = GHOST_HOUSE;
            *mode = GhostMode::Scatter;
            velocity.speed = ghost_speed(*ghost, *mode, *difficulty, clock.multiplier);
            score.0 += GHOST_POINTS;
            debug!(ghost = %ghost, score = score.0, "Ghost captured");
            events.write(SessionEvent::ScoreChanged(score.0));
        } else {
            let final_score = score.0;
            info!(ghost = %ghost, final_score, frame = clock.frame, "Caught by ghost");
            *stage = GameStage::GameOver { final_score };
            events.write(SessionEvent::GameOver { final_score });
            break;
        }
    }
}
