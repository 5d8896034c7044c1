//! Map parsing functionality for converting raw board layouts into structured data.

use glam::UVec2;

use crate::constants::MapTile;
use crate::error::ParseError;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    /// The parsed tile layout, row-major.
    pub tiles: Vec<MapTile>,
    /// Board size in cells (columns, rows).
    pub size: UVec2,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::PowerPellet),
            ' ' => Ok(MapTile::Empty),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, contains unknown characters, or if
    /// its rows differ in length.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().ok_or(ParseError::EmptyBoard)?.chars().count();
        let mut tiles = Vec::with_capacity(width * raw_board.len());

        for (row, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for character in line.chars() {
                tiles.push(Self::parse_character(character)?);
            }
        }

        Ok(ParsedMap {
            tiles,
            size: UVec2::new(width as u32, raw_board.len() as u32),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BOARD_CELL_SIZE, RAW_BOARD};

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('#'), Ok(MapTile::Wall));
        assert_eq!(MapTileParser::parse_character('.'), Ok(MapTile::Pellet));
        assert_eq!(MapTileParser::parse_character('o'), Ok(MapTile::PowerPellet));
        assert_eq!(MapTileParser::parse_character(' '), Ok(MapTile::Empty));
        assert_eq!(MapTileParser::parse_character('Z'), Err(ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_parse_board() {
        let parsed = MapTileParser::parse_board(&RAW_BOARD).unwrap();
        assert_eq!(parsed.size, BOARD_CELL_SIZE);
        assert_eq!(parsed.tiles.len(), (BOARD_CELL_SIZE.x * BOARD_CELL_SIZE.y) as usize);
        assert_eq!(parsed.tiles[0], MapTile::Wall);
        assert_eq!(parsed.tiles[21 + 1], MapTile::PowerPellet);
    }

    #[test]
    fn test_parse_board_invalid_character() {
        let mut invalid_board = RAW_BOARD;
        invalid_board[0] = "####################Z";

        let result = MapTileParser::parse_board(&invalid_board);
        assert_eq!(result, Err(ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_parse_board_ragged_row() {
        let result = MapTileParser::parse_board(&["###", "#.", "###"]);
        assert_eq!(
            result,
            Err(ParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_parse_board_empty() {
        assert_eq!(MapTileParser::parse_board(&[]), Err(ParseError::EmptyBoard));
    }
}
