//! Session timing and the progressive speed multiplier.

use bevy_ecs::query::{With, Without};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::debug;

use crate::constants::clock::{MAX_SPEED_MULTIPLIER, SPEED_GROWTH, SPEED_STAGE_MS};
use crate::systems::components::{Difficulty, FrameTimestamp, GameStage, Ghost, GhostMode, PlayerControlled, Velocity};
use crate::systems::ghost::ghost_speed;
use crate::systems::movement::player_speed;

/// Per-session timing state. Replaced wholesale when a new session starts.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    /// Host timestamp of the first simulated frame.
    pub start_ms: Option<f64>,
    pub elapsed_ms: f64,
    /// Never decreases within a session and never exceeds the cap.
    pub multiplier: f32,
    /// Number of frames simulated so far.
    pub frame: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            start_ms: None,
            elapsed_ms: 0.0,
            multiplier: 1.0,
            frame: 0,
        }
    }
}

/// The speed multiplier after `elapsed_ms` of play: 1.5 per 30 second stage, capped at 5.
pub fn speed_multiplier(elapsed_ms: f64) -> f32 {
    let stage = (elapsed_ms.max(0.0) / SPEED_STAGE_MS).floor();
    if stage >= 64.0 {
        return MAX_SPEED_MULTIPLIER;
    }

    SPEED_GROWTH.powi(stage as i32).min(MAX_SPEED_MULTIPLIER)
}

/// Advances the clock and, when the multiplier steps up, rescales every speed.
pub fn speed_scaling_system(
    stage: Res<GameStage>,
    now: Res<FrameTimestamp>,
    difficulty: Res<Difficulty>,
    mut clock: ResMut<SimulationClock>,
    mut player: Query<&mut Velocity, With<PlayerControlled>>,
    mut ghosts: Query<(&Ghost, &GhostMode, &mut Velocity), Without<PlayerControlled>>,
) {
    if !stage.is_playing() {
        return;
    }

    let start = *clock.start_ms.get_or_insert(now.0);
    clock.elapsed_ms = (now.0 - start).max(0.0);

    let multiplier = speed_multiplier(clock.elapsed_ms).max(clock.multiplier);
    if multiplier != clock.multiplier {
        debug!(
            elapsed_ms = clock.elapsed_ms,
            previous = clock.multiplier,
            multiplier,
            "Speed multiplier changed"
        );
        clock.multiplier = multiplier;

        for mut velocity in player.iter_mut() {
            velocity.speed = player_speed(multiplier);
        }
        for (ghost, mode, mut velocity) in ghosts.iter_mut() {
            velocity.speed = ghost_speed(*ghost, *mode, *difficulty, multiplier);
        }
    }

    clock.frame += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_multiplier_stages() {
        assert_eq!(speed_multiplier(0.0), 1.0);
        assert_eq!(speed_multiplier(29_999.0), 1.0);
        assert_eq!(speed_multiplier(30_000.0), 1.5);
        assert_eq!(speed_multiplier(60_000.0), 2.25);
        assert_eq!(speed_multiplier(90_000.0), 3.375);
    }

    #[test]
    fn test_speed_multiplier_capped() {
        assert_eq!(speed_multiplier(120_000.0), 5.0);
        assert_eq!(speed_multiplier(1.0e12), 5.0);
    }

    #[test]
    fn test_speed_multiplier_negative_elapsed() {
        assert_eq!(speed_multiplier(-500.0), 1.0);
    }
}
