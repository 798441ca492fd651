//! Fixed-size grid of tiles
//!
//! A tilemap is one "screen" of a level. It is built once from authored rows
//! and never mutated afterwards. Queries outside the grid are answered by the
//! map's [`BoundaryPolicy`] instead of failing.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::error::LevelError;

/// What lies outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryPolicy {
    /// Tile reported left of column 0 and right of the last column
    pub horizontal: Tile,
    /// Tile reported above row 0 and below the last row
    pub vertical: Tile,
}

impl Default for BoundaryPolicy {
    /// Solid side walls, open top and bottom so stacked screens fall through
    fn default() -> Self {
        Self {
            horizontal: Tile::Full,
            vertical: Tile::Empty,
        }
    }
}

impl BoundaryPolicy {
    /// Solid on every side
    pub fn solid() -> Self {
        Self {
            horizontal: Tile::Full,
            vertical: Tile::Full,
        }
    }

    /// Open on every side
    pub fn open() -> Self {
        Self {
            horizontal: Tile::Empty,
            vertical: Tile::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    width: usize,
    height: usize,
    /// Row-major
    tiles: Vec<Tile>,
    boundary: BoundaryPolicy,
}

impl Tilemap {
    /// Create an all-empty tilemap
    pub fn new(width: usize, height: usize, boundary: BoundaryPolicy) -> Result<Self, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::EmptyGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
            boundary,
        })
    }

    /// Build a tilemap from authored rows.
    ///
    /// Short rows and missing trailing rows are padded with empty tiles.
    /// Rows wider than the grid, or more rows than the grid is tall, are
    /// rejected.
    pub fn from_rows<S: AsRef<str>>(
        width: usize,
        height: usize,
        rows: &[S],
        boundary: BoundaryPolicy,
    ) -> Result<Self, LevelError> {
        let mut map = Self::new(width, height, boundary)?;
        if rows.len() > height {
            return Err(LevelError::TooManyRows {
                rows: rows.len(),
                height,
            });
        }

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len > width {
                return Err(LevelError::RowTooWide { row: y, len, width });
            }
            for (x, c) in row.chars().enumerate() {
                map.tiles[y * width + x] = Tile::from_char(c);
            }
        }

        Ok(map)
    }

    /// Render back to canonical authoring rows (`'#'` and `' '`)
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|t| t.to_char()).collect())
            .collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Tile at (x, y), or the boundary tile outside the grid.
    ///
    /// Columns outside the grid take the horizontal rule even when the row
    /// is also out of range.
    pub fn classify(&self, x: i32, y: i32) -> Tile {
        if x < 0 || x as usize >= self.width {
            return self.boundary.horizontal;
        }
        if y < 0 || y as usize >= self.height {
            return self.boundary.vertical;
        }
        self.tiles[y as usize * self.width + x as usize]
    }

    #[inline]
    pub fn classify_at(&self, p: IVec2) -> Tile {
        self.classify(p.x, p.y)
    }

    #[inline]
    pub fn is_full(&self, x: i32, y: i32) -> bool {
        self.classify(x, y).is_full()
    }

    /// Number of full tiles inside the grid
    pub fn full_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_full()).count()
    }
}
