//! Turns the world into an ordered list of drawing primitives.
//!
//! Nothing here touches SDL; the desktop frontend replays the [`DrawList`] onto a canvas,
//! and tests compare lists directly.

use bevy_ecs::query::With;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use glam::{UVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::{animation::POWER_PULSE_RATE, colors, MapTile, BOARD_CELL_SIZE};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::map::items::ItemLayer;
use crate::systems::clock::SimulationClock;
use crate::systems::components::{Ghost, GhostMode, PlayerControlled, Position, Tint, Velocity};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

/// A single drawing primitive, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    StrokeRect { origin: Vec2, size: Vec2, color: Rgba },
    FillRoundedRect { origin: Vec2, size: Vec2, radius: f32, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    FillTriangle { points: [Vec2; 3], color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba },
}

/// The frame's drawing, rebuilt from scratch every frame.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DrawList(Vec<DrawCommand>);

impl DrawList {
    pub fn push(&mut self, command: DrawCommand) {
        self.0.push(command);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Size of the drawing surface, in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize(pub Vec2);

/// Where the board sits on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Side length of one tile, in pixels.
    pub tile: f32,
    /// Top-left corner of the board.
    pub offset: Vec2,
}

impl BoardLayout {
    /// Fits a board of `cells` into `surface`, keeping tiles square and centering the board.
    pub fn new(surface: Vec2, cells: UVec2) -> Self {
        let cells = cells.as_vec2();
        let tile = (surface.x / cells.x).min(surface.y / cells.y);
        let offset = (surface - cells * tile) / 2.0;
        Self { tile, offset }
    }

    /// Top-left pixel of the tile-sized box drawn for a grid position.
    pub fn cell_origin(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.tile
    }
}

/// A letterboxed rectangle inside a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Fits the board's aspect ratio into the available area.
///
/// Height is tried first; when the resulting width overflows, width is used instead.
pub fn fit_surface(available: Vec2) -> Viewport {
    let cells = BOARD_CELL_SIZE.as_vec2();

    let mut size = Vec2::new(available.y * cells.x / cells.y, available.y);
    if size.x > available.x {
        size = Vec2::new(available.x, available.x * cells.y / cells.x);
    }

    Viewport {
        origin: (available - size) / 2.0,
        size,
    }
}

/// Scale factor of the power item at a given frame, between 0.7 and 1.3.
pub fn power_pulse(frame: u64) -> f32 {
    ((frame as f32 * POWER_PULSE_RATE).sin() + 1.0) * 0.3 + 0.7
}

fn draw_wall(list: &mut DrawList, origin: Vec2, size: f32) {
    list.push(DrawCommand::FillRect {
        origin,
        size: Vec2::splat(size),
        color: colors::WALL_BASE,
    });
    list.push(DrawCommand::FillRect {
        origin: origin + 2.0,
        size: Vec2::splat(size - 4.0),
        color: colors::WALL_TOP,
    });
    list.push(DrawCommand::StrokeRect {
        origin: origin + 4.0,
        size: Vec2::splat(size - 8.0),
        color: colors::WALL_NEON,
    });
}

fn draw_marketer(list: &mut DrawList, origin: Vec2, size: f32, facing: Option<Direction>) {
    let center = origin + size / 2.0;
    let radius = size / 2.0 - 2.0;

    list.push(DrawCommand::FillCircle {
        center,
        radius,
        color: colors::MARKETER_SKIN,
    });

    let look = facing.map_or(Vec2::ZERO, |direction| direction.as_vec2() * 2.0);
    let glasses_y = center.y - 2.0;
    let glass = radius / 2.5;

    list.push(DrawCommand::StrokeRect {
        origin: Vec2::new(center.x - glass - 2.0, glasses_y - glass / 2.0) + look,
        size: Vec2::splat(glass),
        color: colors::MARKETER_GLASSES,
    });
    list.push(DrawCommand::StrokeRect {
        origin: Vec2::new(center.x + 2.0, glasses_y - glass / 2.0) + look,
        size: Vec2::splat(glass),
        color: colors::MARKETER_GLASSES,
    });
    list.push(DrawCommand::Line {
        from: Vec2::new(center.x - 2.0, glasses_y) + look,
        to: Vec2::new(center.x + 2.0, glasses_y) + look,
        color: colors::MARKETER_GLASSES,
    });
}

fn draw_financier(list: &mut DrawList, origin: Vec2, size: f32, tie: Rgba, frightened: bool) {
    let center = origin + size / 2.0;

    if frightened {
        list.push(DrawCommand::FillCircle {
            center,
            radius: size / 2.0 - 4.0,
            color: colors::FRIGHTENED_BODY,
        });
        let mouth = [
            Vec2::new(-5.0, 5.0),
            Vec2::new(-2.0, 2.0),
            Vec2::new(2.0, 5.0),
            Vec2::new(5.0, 2.0),
        ];
        for pair in mouth.windows(2) {
            list.push(DrawCommand::Line {
                from: center + pair[0],
                to: center + pair[1],
                color: colors::FRIGHTENED_MOUTH,
            });
        }
        return;
    }

    let shoulders = Vec2::new(size - 6.0, size / 2.0);
    list.push(DrawCommand::FillRoundedRect {
        origin: Vec2::new(center.x - shoulders.x / 2.0, center.y),
        size: shoulders,
        radius: 4.0,
        color: colors::SUIT_NAVY,
    });
    list.push(DrawCommand::FillCircle {
        center: center - Vec2::new(0.0, 4.0),
        radius: size / 3.5,
        color: colors::SHIRT,
    });
    list.push(DrawCommand::FillTriangle {
        points: [
            center + Vec2::new(-2.0, 2.0),
            center + Vec2::new(2.0, 2.0),
            center + Vec2::new(0.0, 12.0),
        ],
        color: tie,
    });
    for eye in [Vec2::new(-4.0, -6.0), Vec2::new(2.0, -6.0)] {
        list.push(DrawCommand::FillRect {
            origin: center + eye,
            size: Vec2::splat(2.0),
            color: colors::EYES,
        });
    }
}

/// Rebuilds the [`DrawList`] from the current state.
///
/// Reads only; identical state always yields an identical list.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    map: Res<Map>,
    items: Res<ItemLayer>,
    clock: Res<SimulationClock>,
    surface: Res<SurfaceSize>,
    player: Query<(&Position, &Velocity), With<PlayerControlled>>,
    ghosts: Query<(&Ghost, &GhostMode, &Position, &Tint)>,
    mut list: ResMut<DrawList>,
) {
    list.clear();
    list.push(DrawCommand::Clear(colors::BACKGROUND));

    let layout = BoardLayout::new(surface.0, map.size());
    let tile = layout.tile;
    let pulse = power_pulse(clock.frame);

    for (cell, layout_tile) in map.cells() {
        let origin = layout.cell_origin(cell.as_vec2());
        if layout_tile == MapTile::Wall {
            draw_wall(&mut list, origin, tile);
            continue;
        }

        match items.get(cell) {
            Some(MapTile::Pellet) => list.push(DrawCommand::FillCircle {
                center: origin + tile / 2.0,
                radius: tile * 0.15,
                color: colors::BUDGET_COIN,
            }),
            Some(MapTile::PowerPellet) => list.push(DrawCommand::FillCircle {
                center: origin + tile / 2.0,
                radius: (tile / 4.0) * pulse,
                color: colors::VIRAL_POST,
            }),
            _ => {}
        }
    }

    for (position, velocity) in player.iter() {
        draw_marketer(&mut list, layout.cell_origin(position.0), tile, velocity.direction);
    }

    let mut ordered: SmallVec<[_; 4]> = ghosts.iter().collect();
    ordered.sort_by_key(|(ghost, ..)| ghost.id());
    for (_, mode, position, tint) in ordered {
        draw_financier(
            &mut list,
            layout.cell_origin(position.0),
            tile,
            tint.0,
            *mode == GhostMode::Frightened,
        );
    }
}
