//! Level construction errors
//!
//! Tile queries never fail; only building a level from authored data can.

use std::fmt;

#[derive(Debug)]
pub enum LevelError {
    /// Grid with zero width or height
    EmptyGrid { width: usize, height: usize },
    /// Authored row has more cells than the grid is wide
    RowTooWide { row: usize, len: usize, width: usize },
    /// More rows authored than the grid is tall
    TooManyRows { rows: usize, height: usize },
    /// Level with no screens
    NoScreens,
    /// Screen whose size differs from the first screen
    ScreenSizeMismatch {
        screen: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Level or tuning file is not valid JSON for its schema
    Parse(serde_json::Error),
    /// Level or tuning file could not be read
    Io(std::io::Error),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::EmptyGrid { width, height } => {
                write!(f, "tilemap must be non-empty, got {width}x{height}")
            }
            LevelError::RowTooWide { row, len, width } => {
                write!(f, "row {row} has {len} cells but the tilemap is {width} wide")
            }
            LevelError::TooManyRows { rows, height } => {
                write!(f, "{rows} rows authored but the tilemap is {height} tall")
            }
            LevelError::NoScreens => write!(f, "level has no screens"),
            LevelError::ScreenSizeMismatch {
                screen,
                expected,
                found,
            } => write!(
                f,
                "screen {screen} is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            LevelError::Parse(e) => write!(f, "invalid level data: {e}"),
            LevelError::Io(e) => write!(f, "failed to read level data: {e}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(e) => Some(e),
            LevelError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}
