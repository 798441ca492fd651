//! Box vs tilemap collision detection and response
//!
//! The tricky part of the platformer: a moving axis-aligned box against a grid
//! of solid cells. Resolution is axis-separated. For each overlapping solid
//! tile we look for an exposed face (a neighbor that is not solid between the
//! box and the tile), pick one axis to clip, snap the box onto that face and
//! adjust the velocity on that axis only.
//!
//! Tiles are handled one at a time in a single sweep. A later tile can
//! overwrite an earlier tile's correction, and a box buried with no exposed
//! face is left where it is.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::tilemap::Tilemap;

/// Half-size of a tile, added to a box's half-extent to get the overlap margin
const TILE_HALF: Vec2 = Vec2::splat(0.5);

/// Axis-aligned collision box with its velocity
///
/// Units are tiles; Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_extent: Vec2,
    /// Tiles per second
    pub vel: Vec2,
}

impl Hitbox {
    pub fn new(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            center,
            half_extent,
            vel: Vec2::ZERO,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent
    }

    /// Bottom edge (Y down)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half_extent.y
    }
}

/// Velocity response on one axis when that axis gets clipped
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AxisResponse {
    /// Drop the velocity component moving into the surface
    #[default]
    Clamp,
    /// Reflect velocity moving into the surface, scaled by the factor
    Bounce(f32),
}

impl AxisResponse {
    /// Velocity after the box was pushed out along `push_dir` (+1 or -1)
    #[inline]
    pub fn apply(self, vel: f32, push_dir: f32) -> f32 {
        match self {
            AxisResponse::Clamp => {
                if push_dir > 0.0 {
                    vel.max(0.0)
                } else {
                    vel.min(0.0)
                }
            }
            AxisResponse::Bounce(factor) => {
                // Only reflect motion into the surface; outgoing motion is left alone
                if vel * push_dir < 0.0 {
                    -vel * factor
                } else {
                    vel
                }
            }
        }
    }
}

/// Per-axis response policy for one entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CollisionResponse {
    pub x: AxisResponse,
    pub y: AxisResponse,
}

impl CollisionResponse {
    /// Inelastic on both axes (platformer character)
    pub fn clamp() -> Self {
        Self::default()
    }

    /// Bounce off walls, stop on floors and ceilings
    pub fn bouncy(factor: f32) -> Self {
        Self {
            x: AxisResponse::Bounce(factor),
            y: AxisResponse::Clamp,
        }
    }
}

/// Which axes a resolve call clipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveReport {
    pub clipped_x: bool,
    pub clipped_y: bool,
}

impl ResolveReport {
    #[inline]
    pub fn any(&self) -> bool {
        self.clipped_x || self.clipped_y
    }

    /// Combine reports from several tilemaps
    pub fn merge(self, other: ResolveReport) -> ResolveReport {
        ResolveReport {
            clipped_x: self.clipped_x || other.clipped_x,
            clipped_y: self.clipped_y || other.clipped_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Tiles a box may overlap, x-major then y
///
/// Conservative: every tile the box touches is included, plus possibly a few
/// it only reaches with an edge.
pub fn candidate_tiles(center: Vec2, half_extent: Vec2) -> impl Iterator<Item = IVec2> {
    let start = (center - half_extent).floor().as_ivec2();
    let end = (center + half_extent).floor().as_ivec2();
    (start.x..=end.x).flat_map(move |x| (start.y..=end.y).map(move |y| IVec2::new(x, y)))
}

/// Signed distance between box and tile surfaces on each axis
///
/// Both components `<= 0` means the two overlap (touching counts).
#[inline]
fn surface_distance(center: Vec2, half_extent: Vec2, tile: IVec2) -> Vec2 {
    let tile_center = tile.as_vec2() + TILE_HALF;
    (center - tile_center).abs() - (half_extent + TILE_HALF)
}

#[inline]
fn overlaps(surf_dist: Vec2) -> bool {
    surf_dist.x <= 0.0 && surf_dist.y <= 0.0
}

/// Check whether a box touches any solid tile
///
/// `offset_y` places the tilemap in world space (tilemap row 0 sits at world
/// y = `offset_y`).
pub fn is_box_colliding_with_tilemap(
    center: Vec2,
    half_extent: Vec2,
    tilemap: &Tilemap,
    offset_y: f32,
) -> bool {
    let local = center - Vec2::new(0.0, offset_y);
    candidate_tiles(local, half_extent)
        .filter(|&tile| tilemap.classify_at(tile).is_full())
        .any(|tile| overlaps(surface_distance(local, half_extent, tile)))
}

/// Push a box out of solid tiles and adjust its velocity
///
/// One sweep over the candidate tiles. For each overlapping solid tile the
/// clip axis is the one with an exposed face; if both are exposed, the axis
/// with the shallower penetration wins (ties go to Y).
pub fn resolve_box_collision_with_tilemap(
    hitbox: &mut Hitbox,
    tilemap: &Tilemap,
    offset_y: f32,
    response: CollisionResponse,
) -> ResolveReport {
    let mut report = ResolveReport::default();
    let half = hitbox.half_extent;
    let size_sum = half + TILE_HALF;
    let mut local = hitbox.center - Vec2::new(0.0, offset_y);

    for tile in candidate_tiles(local, half) {
        if !tilemap.classify_at(tile).is_full() {
            continue;
        }

        let tile_center = tile.as_vec2() + TILE_HALF;
        let delta = local - tile_center;
        let surf_dist = delta.abs() - size_sum;
        if !overlaps(surf_dist) {
            continue;
        }

        // Neighbor between the box and this tile on each axis
        let step_x = if delta.x > 0.0 { 1 } else { -1 };
        let step_y = if delta.y > 0.0 { 1 } else { -1 };
        let x_exposed = !tilemap.is_full(tile.x + step_x, tile.y);
        let y_exposed = !tilemap.is_full(tile.x, tile.y + step_y);

        let axis = match (x_exposed, y_exposed) {
            (false, false) => continue,
            (true, false) => Axis::X,
            (false, true) => Axis::Y,
            (true, true) => {
                if surf_dist.x > surf_dist.y {
                    Axis::X
                } else {
                    Axis::Y
                }
            }
        };

        match axis {
            Axis::X => {
                let dir = step_x as f32;
                local.x = tile_center.x + size_sum.x * dir;
                hitbox.vel.x = response.x.apply(hitbox.vel.x, dir);
                report.clipped_x = true;
            }
            Axis::Y => {
                let dir = step_y as f32;
                local.y = tile_center.y + size_sum.y * dir;
                hitbox.vel.y = response.y.apply(hitbox.vel.y, dir);
                report.clipped_y = true;
            }
        }
    }

    hitbox.center = local + Vec2::new(0.0, offset_y);
    report
}
