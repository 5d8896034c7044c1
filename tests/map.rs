use budget_run::constants::{MapTile, BOARD_CELL_SIZE, GHOST_HOUSE, PLAYER_START, RAW_BOARD};
use budget_run::error::{GameError, ParseError};
use budget_run::map::builder::{nearest_tile, Map};
use budget_run::map::direction::Direction;
use budget_run::map::items::ItemLayer;
use budget_run::systems::Ghost;
use glam::{IVec2, Vec2};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_map_dimensions() {
    let map = Map::new(&RAW_BOARD).unwrap();
    assert_that(&map.size()).is_equal_to(BOARD_CELL_SIZE);
    assert_that(&map.columns()).is_equal_to(21);
    assert_that(&map.size().y).is_equal_to(20);
}

#[test]
fn test_map_rejects_bad_layouts() {
    let ragged = Map::new(&["###", "##"]);
    assert!(matches!(
        ragged,
        Err(GameError::MapParse(ParseError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }))
    ));

    let unknown = Map::new(&["#X#"]);
    assert!(matches!(unknown, Err(GameError::MapParse(ParseError::UnknownCharacter('X')))));

    let empty: [&str; 0] = [];
    assert!(matches!(Map::new(&empty), Err(GameError::MapParse(ParseError::EmptyBoard))));
}

#[test]
fn test_board_is_walled_in() {
    let map = Map::new(&RAW_BOARD).unwrap();
    for (cell, tile) in map.cells() {
        let border = cell.x == 0 || cell.y == 0 || cell.x == 20 || cell.y == 19;
        if border {
            assert_eq!(tile, MapTile::Wall, "border cell {cell} is open");
        }
    }
}

#[test]
fn test_ghost_house_and_corridor_open() {
    let map = Map::new(&RAW_BOARD).unwrap();
    assert_that(&map.is_wall_cell(nearest_tile(GHOST_HOUSE))).is_false();
    assert_that(&map.is_open(IVec2::new(10, 8), Direction::Down)).is_true();
    assert_that(&map.is_open(IVec2::new(10, 8), Direction::Up)).is_false();
}

#[test]
fn test_spawn_points_touch_open_floor() {
    let map = Map::new(&RAW_BOARD).unwrap();
    let reachable = |position: Vec2| {
        let tile = nearest_tile(position);
        Direction::DIRECTIONS.iter().any(|direction| map.is_open(tile, *direction))
    };

    assert_that(&reachable(PLAYER_START)).is_true();
    for ghost in Ghost::ALL {
        assert!(reachable(ghost.start_position()), "{ghost} is boxed in");
    }
}

#[test]
fn test_item_layer_tracks_board() {
    let map = Map::new(&RAW_BOARD).unwrap();
    let mut items = ItemLayer::from_map(&map);

    assert_that(&items.remaining()).is_equal_to(174);
    assert_that(&items.get(IVec2::new(1, 1))).is_equal_to(Some(MapTile::PowerPellet));
    assert_that(&items.consume(IVec2::new(1, 1))).is_equal_to(Some(MapTile::PowerPellet));
    assert_that(&items.has_items()).is_true();
    assert_that(&items.remaining()).is_equal_to(173);

    // The immutable map is unaffected
    assert_that(&map.tile(IVec2::new(1, 1))).is_equal_to(Some(MapTile::PowerPellet));
}

#[test]
fn test_direction_helpers() {
    for direction in Direction::DIRECTIONS {
        assert_eq!(direction.opposite().opposite(), direction);
        assert_eq!(direction.as_ivec2() + direction.opposite().as_ivec2(), IVec2::ZERO);
        assert_eq!(direction.is_vertical(), direction.opposite().is_vertical());
    }
    assert_eq!(Direction::Up.as_ivec2(), IVec2::new(0, -1));
    assert_eq!(Direction::Left.as_ref(), "left");
}
