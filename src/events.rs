use bevy_ecs::prelude::*;

use crate::map::direction::Direction;
use crate::systems::components::Difficulty;

/// Requests coming from the host, translated from keys or touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    StartGame,
    SetDifficulty(Difficulty),
}

/// Outcomes of a simulated frame, reported to the host in the order they happened.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The score changed; carries the new total.
    ScoreChanged(u32),
    /// The player was caught. The score is frozen from here on.
    GameOver { final_score: u32 },
    /// Every item was collected.
    Won,
}

/// Receives session outcomes from the host loop.
pub trait SessionObserver {
    fn on_score_update(&mut self, score: u32);
    fn on_game_over(&mut self, final_score: u32);
    fn on_win(&mut self);
}

impl SessionEvent {
    /// Forwards this event to the matching observer callback.
    pub fn dispatch(self, observer: &mut impl SessionObserver) {
        match self {
            SessionEvent::ScoreChanged(score) => observer.on_score_update(score),
            SessionEvent::GameOver { final_score } => observer.on_game_over(final_score),
            SessionEvent::Won => observer.on_win(),
        }
    }
}
