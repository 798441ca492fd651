//! Data-driven movement tuning
//!
//! Every field has a default so a tuning file only needs the values it
//! overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::sim::collision::{AxisResponse, CollisionResponse};

/// Physics constants for the player and the ball
///
/// Units are tiles and seconds; Y grows downward so gravity is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Player collision box half-size
    pub player_half_extent: Vec2,
    /// Downward acceleration (tiles/s²)
    pub gravity: f32,
    /// Horizontal acceleration while walking
    pub walk_accel: f32,
    /// Walking stops accelerating past this speed
    pub walk_max_speed: f32,
    /// Deceleration on the ground with no direction held
    pub ground_decel: f32,
    /// Fraction of `walk_accel` available in the air
    pub air_control: f32,
    /// Charge time below this jumps at minimum strength (seconds)
    pub jump_charge_min: f32,
    /// Charge time above this jumps at full strength (seconds)
    pub jump_charge_max: f32,
    /// Upward speed of a minimum-strength jump
    pub jump_speed_min: f32,
    /// Upward speed of a full-strength jump
    pub jump_speed_max: f32,
    /// Horizontal speed given to a jump with a direction held
    pub jump_horizontal_speed: f32,
    /// Velocity length cap (none = uncapped)
    pub max_speed: Option<f32>,
    /// How the player reacts to walls, floors and ceilings
    pub player_response: CollisionResponse,

    // === Ball ===
    /// Ball collision box half-size
    pub ball_half_extent: Vec2,
    /// Acceleration from the arrow keys
    pub ball_accel: f32,
    /// Downward acceleration on the ball (0 = free floating)
    pub ball_gravity: f32,
    /// Exponential velocity damping per second
    pub ball_damping: f32,
    /// Fraction of speed kept when bouncing off a wall
    pub ball_bounce: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_half_extent: Vec2::new(0.3, 0.4),
            gravity: 40.0,
            walk_accel: 30.0,
            walk_max_speed: 6.0,
            ground_decel: 40.0,
            air_control: 0.35,
            jump_charge_min: 0.05,
            jump_charge_max: 0.6,
            jump_speed_min: 8.0,
            jump_speed_max: 20.0,
            jump_horizontal_speed: 6.0,
            max_speed: Some(30.0),
            player_response: CollisionResponse::clamp(),

            ball_half_extent: Vec2::splat(0.25),
            ball_accel: 20.0,
            ball_gravity: 0.0,
            ball_damping: 1.0,
            ball_bounce: 0.45,
        }
    }
}

impl Tuning {
    /// Player bounces off walls instead of stopping dead
    pub fn with_wall_bounce(mut self, factor: f32) -> Self {
        self.player_response.x = AxisResponse::Bounce(factor);
        self
    }

    /// Collision response used for the ball
    pub fn ball_response(&self) -> CollisionResponse {
        CollisionResponse::bouncy(self.ball_bounce)
    }

    /// Jump strength in [0, 1] for a given charge time
    pub fn jump_strength(&self, charge: f32) -> f32 {
        let span = self.jump_charge_max - self.jump_charge_min;
        if span <= 0.0 {
            return 1.0;
        }
        (charge.clamp(self.jump_charge_min, self.jump_charge_max) - self.jump_charge_min) / span
    }

    /// Upward jump speed for a given charge time
    pub fn jump_speed(&self, charge: f32) -> f32 {
        let t = self.jump_strength(charge);
        self.jump_speed_min + (self.jump_speed_max - self.jump_speed_min) * t
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
