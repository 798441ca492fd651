//! Tile Platformer - a tile-based 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, player, ball, game state)
//! - `level`: Stacked tilemap screens, level files and built-in levels
//! - `tuning`: Data-driven movement constants
//! - `error`: Level and tuning loading errors

pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::LevelError;
pub use level::{Level, LevelData};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the host may report before it is clamped (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
