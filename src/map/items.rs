//! The mutable layer of collectible items laid over the static map.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2};

use crate::constants::MapTile;
use crate::map::builder::Map;

/// Per-cell item state, same dimensions as the [`Map`].
///
/// Initialized from the layout; the only mutation is consuming an item, which
/// turns the cell into [`MapTile::Empty`]. Wall cells are never collectible.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ItemLayer {
    cells: Vec<MapTile>,
    size: UVec2,
    remaining: usize,
}

impl ItemLayer {
    /// Copies the item codes out of the layout.
    pub fn from_map(map: &Map) -> Self {
        let cells: Vec<MapTile> = map.cells().map(|(_, tile)| tile).collect();
        let remaining = cells.iter().filter(|tile| tile.is_collectible()).count();
        Self {
            cells,
            size: map.size(),
            remaining,
        }
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        let in_bounds = cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.size.x && (cell.y as u32) < self.size.y;
        in_bounds.then(|| cell.y as usize * self.size.x as usize + cell.x as usize)
    }

    /// The item code at `cell`, or `None` when out of bounds.
    pub fn get(&self, cell: IVec2) -> Option<MapTile> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Consumes the item at `cell`, returning what was there.
    ///
    /// Returns `None` (and changes nothing) when the cell holds no collectible.
    pub fn consume(&mut self, cell: IVec2) -> Option<MapTile> {
        let index = self.index(cell)?;
        let tile = self.cells[index];
        if !tile.is_collectible() {
            return None;
        }

        self.cells[index] = MapTile::Empty;
        self.remaining -= 1;
        Some(tile)
    }

    /// Number of regular and power items left.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether any regular or power item is left.
    pub fn has_items(&self) -> bool {
        self.remaining > 0
    }

    /// Iterates over all cells holding a collectible, row by row.
    pub fn items(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        let columns = self.size.x as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_collectible())
            .map(move |(index, tile)| (IVec2::new((index % columns) as i32, (index / columns) as i32), *tile))
    }
}
