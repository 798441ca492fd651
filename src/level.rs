//! Levels made of vertically stacked tilemap screens
//!
//! Screen `i` occupies world rows `[i * height, (i + 1) * height)`; screen 0
//! is the top of the level. The camera shows one screen at a time.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::sim::collision::{
    CollisionResponse, Hitbox, ResolveReport, is_box_colliding_with_tilemap,
    resolve_box_collision_with_tilemap,
};
use crate::sim::tilemap::{BoundaryPolicy, Tilemap};

/// Authored level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    /// Player spawn point (world coordinates)
    pub spawn: Vec2,
    /// Ball spawn point, if the level has a ball
    #[serde(default)]
    pub ball_spawn: Option<Vec2>,
    /// Rows of each screen, top screen first
    pub screens: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Level {
    screens: Vec<Tilemap>,
    width: usize,
    height: usize,
    spawn: Vec2,
    ball_spawn: Option<Vec2>,
}

impl Level {
    /// Build a level from already constructed screens
    pub fn new(screens: Vec<Tilemap>, spawn: Vec2) -> Result<Self, LevelError> {
        let first = screens.first().ok_or(LevelError::NoScreens)?;
        let expected = (first.width(), first.height());
        for (i, screen) in screens.iter().enumerate() {
            let found = (screen.width(), screen.height());
            if found != expected {
                return Err(LevelError::ScreenSizeMismatch {
                    screen: i,
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            width: expected.0,
            height: expected.1,
            screens,
            spawn,
            ball_spawn: None,
        })
    }

    pub fn from_data(data: &LevelData) -> Result<Self, LevelError> {
        let screens = data
            .screens
            .iter()
            .map(|rows| Tilemap::from_rows(data.width, data.height, rows, data.boundary))
            .collect::<Result<Vec<_>, _>>()?;

        let mut level = Self::new(screens, data.spawn)?;
        level.ball_spawn = data.ball_spawn;
        log::debug!(
            "Built level: {} screens of {}x{}, {} solid tiles",
            level.screens.len(),
            level.width,
            level.height,
            level.screens.iter().map(|s| s.full_count()).sum::<usize>()
        );
        Ok(level)
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let data: LevelData = serde_json::from_str(json)?;
        Self::from_data(&data)
    }

    /// Load a level from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let level = Self::from_json(&json)?;
        log::info!("Loaded level {} ({} screens)", path.display(), level.screens.len());
        Ok(level)
    }

    /// Export back to the authored format
    pub fn to_data(&self) -> LevelData {
        LevelData {
            width: self.width,
            height: self.height,
            boundary: self
                .screens
                .first()
                .map(|s| s.boundary())
                .unwrap_or_default(),
            spawn: self.spawn,
            ball_spawn: self.ball_spawn,
            screens: self.screens.iter().map(|s| s.to_rows()).collect(),
        }
    }

    #[inline]
    pub fn screens(&self) -> &[Tilemap] {
        &self.screens
    }

    #[inline]
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of one screen
    #[inline]
    pub fn screen_height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    #[inline]
    pub fn ball_spawn(&self) -> Option<Vec2> {
        self.ball_spawn
    }

    /// World-space vertical offset of a screen
    #[inline]
    pub fn screen_offset(&self, index: usize) -> f32 {
        (index * self.height) as f32
    }

    /// World y of the bottom edge of the last screen
    pub fn bottom(&self) -> f32 {
        self.screen_offset(self.screens.len())
    }

    /// Screen the camera should show for a world y coordinate
    pub fn screen_index_at(&self, y: f32) -> usize {
        let index = (y / self.height as f32).floor();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(self.screens.len() - 1)
        }
    }

    /// Screens a box can touch, with their offsets
    fn screens_near(&self, center: Vec2, half_extent: Vec2) -> impl Iterator<Item = (f32, &Tilemap)> {
        let first = self.screen_index_at(center.y - half_extent.y);
        let last = self.screen_index_at(center.y + half_extent.y);
        (first..=last).map(move |i| (self.screen_offset(i), &self.screens[i]))
    }

    /// Check a box against every screen it can reach
    pub fn is_box_colliding(&self, center: Vec2, half_extent: Vec2) -> bool {
        self.screens_near(center, half_extent)
            .any(|(offset, screen)| is_box_colliding_with_tilemap(center, half_extent, screen, offset))
    }

    /// Resolve a box against every screen it can reach, top to bottom
    pub fn resolve(&self, hitbox: &mut Hitbox, response: CollisionResponse) -> ResolveReport {
        self.screens_near(hitbox.center, hitbox.half_extent)
            .fold(ResolveReport::default(), |report, (offset, screen)| {
                report.merge(resolve_box_collision_with_tilemap(
                    hitbox, screen, offset, response,
                ))
            })
    }
}

/// Built-in two-screen tutorial level
pub fn builtin() -> Result<Level, LevelError> {
    let data = LevelData {
        width: 16,
        height: 10,
        boundary: BoundaryPolicy::default(),
        spawn: Vec2::new(2.5, 18.5),
        ball_spawn: Some(Vec2::new(8.5, 17.5)),
        screens: [TOP_SCREEN, BOTTOM_SCREEN]
            .iter()
            .map(|rows| rows.iter().map(|r| r.to_string()).collect::<Vec<_>>())
            .collect(),
    };
    Level::from_data(&data)
}

const TOP_SCREEN: &[&str] = &[
    "                ",
    "   ####         ",
    "                ",
    "          ####  ",
    "                ",
    "    ###         ",
    "                ",
    "           ###  ",
    "                ",
    "  ###           ",
];

const BOTTOM_SCREEN: &[&str] = &[
    "                ",
    "        ####    ",
    "                ",
    "   ###          ",
    "                ",
    "          ###   ",
    "                ",
    "                ",
    "                ",
    "################",
];
