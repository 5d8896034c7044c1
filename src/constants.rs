//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each cell, in pixels, at a window scale of 1.
pub const CELL_SIZE: u32 = 32;
/// The size of the game board, in cells (columns, rows).
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(21, 20);
/// The size of the canvas, in pixels, at a window scale of 1.
pub const CANVAS_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * CELL_SIZE, BOARD_CELL_SIZE.y * CELL_SIZE);

/// Where the player spawns at the start of every session.
pub const PLAYER_START: Vec2 = Vec2::new(10.0, 15.0);
/// Where captured ghosts are sent back to.
pub const GHOST_HOUSE: Vec2 = Vec2::new(10.0, 9.0);

/// An enum representing the different types of tiles on the map.
///
/// The same codes are used by the item layer, where a consumed item becomes [`MapTile::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapTile {
    /// Walkable floor with nothing on it.
    Empty,
    /// A wall tile (a building).
    Wall,
    /// A regular item (a budget coin).
    Pellet,
    /// A power item (a viral post).
    PowerPellet,
}

impl MapTile {
    /// Whether the player can pick this tile's contents up.
    pub const fn is_collectible(self) -> bool {
        matches!(self, MapTile::Pellet | MapTile::PowerPellet)
    }
}

/// The raw layout of the game board, one string per row.
///
/// `#` is a wall, `.` a regular item, `o` a power item, and a space is empty floor.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "#####################",
    "#o........#.......o##",
    "#.###.###.#.###.###.#",
    "#.###.###.#.###.###.#",
    "#...................#",
    "#.###.#.#####.#.###.#",
    "#.....#...#...#.....#",
    "#####.### # ###.#####",
    "#####.#       #.#####",
    "#.....# ## ## #.....#",
    "#####.# #   # #.#####",
    "#####.# ##### #.#####",
    "#.........#.........#",
    "#.###.###.#.###.###.#",
    "#...#...........#...#",
    "###.#.#.#####.#.#.###",
    "#.....#...#...#.....#",
    "#.#######.#.#######.#",
    "#o.................o#",
    "#####################",
];

pub mod movement {
    /// How close (in grid units) a coordinate must be to a tile center to allow turning.
    pub const TURN_TOLERANCE: f32 = 0.1;
    /// Player speed in grid units per frame, before the global multiplier.
    pub const PLAYER_BASE_SPEED: f32 = 0.03;
}

pub mod ghost {
    /// Speed of every frightened ghost, before the global multiplier.
    pub const FRIGHTENED_SPEED: f32 = 0.01;
    /// Base speed of the first ghost; each later ghost adds [`SPEED_STEP`].
    pub const BASE_SPEED: f32 = 0.08;
    pub const SPEED_STEP: f32 = 0.01;
    pub const SPEED_DIVISOR: f32 = 5.0;
}

pub mod scoring {
    pub const PELLET_POINTS: u32 = 100;
    pub const POWER_PELLET_POINTS: u32 = 500;
    pub const GHOST_POINTS: u32 = 1000;
    /// Duration of the frightened phase, in frames.
    pub const POWER_DURATION_TICKS: u32 = 600;
    /// Ghosts closer than this (in grid units) touch the player.
    pub const COLLISION_DISTANCE: f32 = 0.6;
}

pub mod clock {
    /// Length of one speed stage, in milliseconds.
    pub const SPEED_STAGE_MS: f64 = 30_000.0;
    pub const SPEED_GROWTH: f32 = 1.5;
    pub const MAX_SPEED_MULTIPLIER: f32 = 5.0;
}

pub mod input {
    /// Minimum swipe displacement, in logical pixels, to register a direction.
    pub const SWIPE_THRESHOLD: f32 = 30.0;
}

pub mod animation {
    /// Frame multiplier fed into the power item pulse.
    pub const POWER_PULSE_RATE: f32 = 0.15;
}

pub mod colors {
    use crate::systems::render::Rgba;

    pub const BACKGROUND: Rgba = Rgba::hex(0x050505);
    pub const WALL_BASE: Rgba = Rgba::hex(0x0f172a);
    pub const WALL_TOP: Rgba = Rgba::hex(0x1e293b);
    pub const WALL_NEON: Rgba = Rgba::hex(0x8b5cf6);

    pub const BUDGET_COIN: Rgba = Rgba::hex(0xfbbf24);
    pub const VIRAL_POST: Rgba = Rgba::hex(0x00f0ff);

    pub const MARKETER_SKIN: Rgba = Rgba::hex(0xfca5a5);
    pub const MARKETER_GLASSES: Rgba = Rgba::hex(0x000000);

    pub const SUIT_NAVY: Rgba = Rgba::hex(0x1e3a8a);
    pub const SHIRT: Rgba = Rgba::hex(0xf3f4f6);
    pub const EYES: Rgba = Rgba::hex(0x000000);
    pub const FRIGHTENED_BODY: Rgba = Rgba::hex(0x3b82f6);
    pub const FRIGHTENED_MOUTH: Rgba = Rgba::hex(0xffffff);

    pub const TIE_RED: Rgba = Rgba::hex(0xef4444);
    pub const TIE_BLUE: Rgba = Rgba::hex(0x3b82f6);
    pub const TIE_GREEN: Rgba = Rgba::hex(0x22c55e);
    pub const TIE_PURPLE: Rgba = Rgba::hex(0xa855f7);
}
