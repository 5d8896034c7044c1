use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::constants::{colors, GHOST_HOUSE, PLAYER_START};
use crate::map::direction::Direction;
use crate::systems::render::Rgba;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// Position in grid units. Integer values are tile centers.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Movement state shared by the player and the ghosts.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Current direction of travel, `None` when the entity has never moved.
    pub direction: Option<Direction>,
    /// Queued direction, committed at the next tile center where it is legal.
    pub next_direction: Option<Direction>,
    /// Grid units per frame.
    pub speed: f32,
}

/// The display color of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub Rgba);

/// The four members of the finance department chasing the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Ghost {
    #[strum(serialize = "CFO")]
    Cfo,
    Auditor,
    Tax,
    Compliance,
}

impl Ghost {
    pub const ALL: [Ghost; 4] = [Ghost::Cfo, Ghost::Auditor, Ghost::Tax, Ghost::Compliance];

    /// Stable identity; also the iteration order for decisions and collisions.
    pub const fn id(self) -> u8 {
        match self {
            Ghost::Cfo => 0,
            Ghost::Auditor => 1,
            Ghost::Tax => 2,
            Ghost::Compliance => 3,
        }
    }

    pub fn start_position(self) -> Vec2 {
        match self {
            Ghost::Cfo => Vec2::new(9.0, 9.0),
            Ghost::Auditor => GHOST_HOUSE,
            Ghost::Tax => Vec2::new(11.0, 9.0),
            Ghost::Compliance => Vec2::new(10.0, 10.0),
        }
    }

    pub const fn start_direction(self) -> Direction {
        match self {
            Ghost::Cfo => Direction::Left,
            Ghost::Auditor => Direction::Up,
            Ghost::Tax => Direction::Right,
            Ghost::Compliance => Direction::Down,
        }
    }

    /// The home corner used while scattering. Corners may lie outside the board.
    pub fn scatter_target(self) -> Vec2 {
        match self {
            Ghost::Cfo => Vec2::new(20.0, 0.0),
            Ghost::Auditor => Vec2::new(1.0, 0.0),
            Ghost::Tax => Vec2::new(20.0, 20.0),
            Ghost::Compliance => Vec2::new(0.0, 20.0),
        }
    }

    pub const fn color(self) -> Rgba {
        match self {
            Ghost::Cfo => colors::TIE_RED,
            Ghost::Auditor => colors::TIE_BLUE,
            Ghost::Tax => colors::TIE_GREEN,
            Ghost::Compliance => colors::TIE_PURPLE,
        }
    }
}

/// Behavioral mode of a ghost.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GhostMode {
    /// Heads for the player.
    Chase,
    /// Heads for its home corner.
    #[default]
    Scatter,
    /// Wanders randomly, may reverse, and can be captured.
    Frightened,
}

/// A ghost's home corner.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ScatterTarget(pub Vec2);

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub tint: Tint,
}

impl PlayerBundle {
    pub fn new(speed: f32) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(PLAYER_START),
            velocity: Velocity {
                direction: None,
                next_direction: None,
                speed,
            },
            tint: Tint(colors::MARKETER_SKIN),
        }
    }
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub mode: GhostMode,
    pub position: Position,
    pub velocity: Velocity,
    pub scatter_target: ScatterTarget,
    pub tint: Tint,
}

impl GhostBundle {
    pub fn new(ghost: Ghost, speed: f32) -> Self {
        Self {
            ghost,
            mode: GhostMode::Scatter,
            position: Position(ghost.start_position()),
            velocity: Velocity {
                direction: Some(ghost.start_direction()),
                next_direction: None,
                speed,
            },
            scatter_target: ScatterTarget(ghost.scatter_target()),
            tint: Tint(ghost.color()),
        }
    }
}

/// Global difficulty, chosen before a session. Only affects ghost base speed.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[strum(to_string = "Intern", serialize = "easy", serialize = "intern")]
    #[serde(alias = "intern")]
    Easy,
    #[default]
    #[strum(to_string = "Manager", serialize = "normal", serialize = "manager")]
    #[serde(alias = "manager")]
    Normal,
    #[strum(to_string = "CMO", serialize = "hard", serialize = "cmo")]
    #[serde(alias = "cmo")]
    Hard,
}

impl Difficulty {
    pub const fn speed_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        }
    }
}

/// A resource to track the overall stage of the game.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum GameStage {
    /// No session has been started yet.
    #[default]
    Idle,
    /// The simulation is running.
    Playing,
    /// Every item was collected.
    Won,
    /// The player touched a ghost that was not frightened.
    GameOver { final_score: u32 },
}

impl GameStage {
    pub fn is_playing(self) -> bool {
        matches!(self, GameStage::Playing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStage::Won | GameStage::GameOver { .. })
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Remaining frightened frames. Zero when no power item is active.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PowerTimer(pub u32);

/// Host timestamp of the frame being simulated, in milliseconds.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameTimestamp(pub f64);

/// Source of randomness for frightened ghosts.
#[derive(Resource, Debug, Clone)]
pub struct GhostRng(pub SmallRng);

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}
