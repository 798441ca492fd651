//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Tilemaps are read-only once built
//! - Stable tile iteration order (x-major, then y)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod player;
pub mod state;
pub mod tick;
pub mod tile;
pub mod tilemap;

pub use ball::{Ball, update_ball};
pub use collision::{
    AxisResponse, CollisionResponse, Hitbox, ResolveReport, candidate_tiles,
    is_box_colliding_with_tilemap, resolve_box_collision_with_tilemap,
};
pub use player::{MovementState, Player, PlayerInput, update_player};
pub use state::GameState;
pub use tick::{TickInput, tick};
pub use tile::{Tile, is_full};
pub use tilemap::{BoundaryPolicy, Tilemap};
