//! Map construction and wall queries.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2, Vec2};
use tracing::debug;

use crate::constants::MapTile;
use crate::error::GameResult;
use crate::map::direction::Direction;
use crate::map::parser::MapTileParser;

/// Rounds half-way values up, towards positive infinity.
///
/// `f32::round` rounds half-way values away from zero, which would disagree for
/// negative coordinates while an entity is mid-wrap.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// The tile whose center is nearest to `position`.
pub fn nearest_tile(position: Vec2) -> IVec2 {
    IVec2::new(round_half_up(position.x) as i32, round_half_up(position.y) as i32)
}

/// The static board layout. Immutable after construction.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    /// The layout tiles, row-major. Items are tracked separately by [`crate::map::items::ItemLayer`].
    tiles: Vec<MapTile>,
    size: UVec2,
}

impl Map {
    /// Creates a new `Map` instance from a raw board layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be parsed.
    pub fn new(raw_board: &[&str]) -> GameResult<Map> {
        let parsed = MapTileParser::parse_board(raw_board)?;
        debug!(
            columns = parsed.size.x,
            rows = parsed.size.y,
            "Parsed board layout"
        );

        Ok(Map {
            tiles: parsed.tiles,
            size: parsed.size,
        })
    }

    /// Board size in cells (columns, rows).
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn columns(&self) -> u32 {
        self.size.x
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        let in_bounds = cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.size.x && (cell.y as u32) < self.size.y;
        in_bounds.then(|| cell.y as usize * self.size.x as usize + cell.x as usize)
    }

    /// The layout tile at `cell`, or `None` when out of bounds.
    pub fn tile(&self, cell: IVec2) -> Option<MapTile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Whether `cell` is a wall. Anything outside the board counts as a wall.
    pub fn is_wall_cell(&self, cell: IVec2) -> bool {
        self.tile(cell).is_none_or(|tile| tile == MapTile::Wall)
    }

    /// Whether the cell containing `position` is a wall, flooring both coordinates.
    pub fn is_wall(&self, position: Vec2) -> bool {
        self.is_wall_cell(position.floor().as_ivec2())
    }

    /// Whether the neighbor of `cell` in `direction` is walkable.
    pub fn is_open(&self, cell: IVec2, direction: Direction) -> bool {
        !self.is_wall_cell(cell + direction.as_ivec2())
    }

    /// Iterates over all cells with their layout tile, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        let columns = self.size.x as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (IVec2::new((index % columns) as i32, (index / columns) as i32), *tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(4.5), 5.0);
        assert_eq!(round_half_up(4.49), 4.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.51), -1.0);
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let map = Map::new(&RAW_BOARD).unwrap();
        assert!(map.is_wall_cell(IVec2::new(-1, 4)));
        assert!(map.is_wall_cell(IVec2::new(21, 4)));
        assert!(map.is_wall_cell(IVec2::new(4, 20)));
        assert!(map.is_wall(Vec2::new(-0.2, 4.0)));
    }

    #[test]
    fn test_is_wall_floors_coordinates() {
        let map = Map::new(&RAW_BOARD).unwrap();
        // (1, 1) is open, (0, 1) is the border
        assert!(!map.is_wall(Vec2::new(1.9, 1.9)));
        assert!(map.is_wall(Vec2::new(0.99, 1.0)));
    }

    #[test]
    fn test_cells_row_major() {
        let map = Map::new(&RAW_BOARD).unwrap();
        let cells: Vec<_> = map.cells().collect();
        assert_eq!(cells.len(), 21 * 20);
        assert_eq!(cells[22], (IVec2::new(1, 1), MapTile::PowerPellet));
    }
}
