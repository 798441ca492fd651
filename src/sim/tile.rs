//! Tile cell states
//!
//! Levels are authored as rows of characters; this is the only place those
//! characters are interpreted. Everything past the parser works with [`Tile`].

use serde::{Deserialize, Serialize};

/// A single cell of a tilemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Full,
}

impl Tile {
    /// Character written for a full tile
    pub const FULL_CHAR: char = '#';
    /// Character written for an empty tile
    pub const EMPTY_CHAR: char = ' ';

    /// Map an authoring character to a tile.
    ///
    /// Space and NUL are empty (NUL shows up when a short row literal is
    /// zero-padded to the grid width). Anything else is solid.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' | '\0' => Tile::Empty,
            _ => Tile::Full,
        }
    }

    /// Canonical authoring character for this tile
    pub fn to_char(self) -> char {
        match self {
            Tile::Empty => Self::EMPTY_CHAR,
            Tile::Full => Self::FULL_CHAR,
        }
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self != Tile::Empty
    }
}

/// Free-function form of [`Tile::is_full`]
#[inline]
pub fn is_full(tile: Tile) -> bool {
    tile.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_encodings() {
        assert_eq!(Tile::from_char(' '), Tile::Empty);
        assert_eq!(Tile::from_char('\0'), Tile::Empty);
        assert!(!is_full(Tile::from_char('\0')));
    }

    #[test]
    fn test_everything_else_is_full() {
        for c in ['#', 'X', '.', '1'] {
            assert!(Tile::from_char(c).is_full(), "{c:?} should be full");
        }
    }

    #[test]
    fn test_char_round_trip() {
        assert_eq!(Tile::from_char(Tile::Full.to_char()), Tile::Full);
        assert_eq!(Tile::from_char(Tile::Empty.to_char()), Tile::Empty);
    }
}
