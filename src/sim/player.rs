//! Player movement
//!
//! Two states, chosen fresh every tick from a probe just below the feet:
//! grounded players walk and charge jumps, airborne players fall with a
//! little air control.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use crate::level::Level;
use crate::tuning::Tuning;

/// Depth of the ground probe below the player's feet
pub const PROBE_DEPTH: f32 = 0.05;
/// Probe width as a fraction of the player's width
pub const PROBE_WIDTH_FACTOR: f32 = 0.9;
/// Horizontal speeds below this snap to zero when decelerating
const STOP_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementState {
    Grounded,
    #[default]
    Airborne,
}

/// Key state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Jump went up this tick
    pub jump_released: bool,
}

impl PlayerInput {
    /// -1, 0 or 1 from the direction keys
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Hitbox,
    pub state: MovementState,
    /// Seconds the jump key has been held on the ground
    pub jump_charge: f32,
    /// Set while a jump is being charged on the ground
    pub charging: bool,
}

impl Player {
    pub fn new(spawn: Vec2, half_extent: Vec2) -> Self {
        Self {
            body: Hitbox::new(spawn, half_extent),
            state: MovementState::Airborne,
            jump_charge: 0.0,
            charging: false,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state == MovementState::Grounded
    }

    /// Thin box just under the feet, as (center, half_extent)
    pub fn ground_probe(&self) -> (Vec2, Vec2) {
        let half = self.body.half_extent;
        let center = self.body.center + Vec2::new(0.0, half.y + PROBE_DEPTH / 2.0);
        (center, Vec2::new(half.x * PROBE_WIDTH_FACTOR, PROBE_DEPTH / 2.0))
    }
}

/// Move `value` toward zero by at most `amount`
#[inline]
fn approach_zero(value: f32, amount: f32) -> f32 {
    if value.abs() <= amount {
        0.0
    } else {
        value - value.signum() * amount
    }
}

/// Accelerate horizontally without pushing past `max_speed`
///
/// Speed already above the cap (e.g. from a jump) is kept, not cut.
#[inline]
fn accelerate_x(vel_x: f32, dir: f32, accel: f32, max_speed: f32, dt: f32) -> f32 {
    if dir == 0.0 {
        return vel_x;
    }
    let target = vel_x + dir * accel * dt;
    if target.abs() <= max_speed || target.abs() < vel_x.abs() {
        target
    } else {
        vel_x.abs().max(max_speed) * dir
    }
}

/// Advance the player by one tick and resolve it against the level
///
/// Returns the movement state the player was in for this tick.
pub fn update_player(
    player: &mut Player,
    input: &PlayerInput,
    level: &Level,
    tuning: &Tuning,
    dt: f32,
) -> MovementState {
    let (probe_center, probe_half) = player.ground_probe();
    player.state = if level.is_box_colliding(probe_center, probe_half) {
        MovementState::Grounded
    } else {
        MovementState::Airborne
    };

    let dir = input.direction();
    let vel = &mut player.body.vel;

    match player.state {
        MovementState::Grounded => {
            if input.jump_released && player.charging {
                let speed = tuning.jump_speed(player.jump_charge);
                vel.x = dir * tuning.jump_horizontal_speed;
                vel.y = -speed;
                log::debug!(
                    "Jump: charge={:.2}s speed={:.1} dir={}",
                    player.jump_charge,
                    speed,
                    dir
                );
                player.jump_charge = 0.0;
                player.charging = false;
            } else if input.jump_held && (player.charging || input.jump_pressed) {
                // Crouched while charging; a jump held since before landing does not count
                player.charging = true;
                player.jump_charge += dt;
                vel.x = 0.0;
            } else {
                player.charging = false;
                player.jump_charge = 0.0;
                if dir == 0.0 {
                    vel.x = approach_zero(vel.x, tuning.ground_decel * dt);
                    if vel.x.abs() < STOP_EPSILON {
                        vel.x = 0.0;
                    }
                } else {
                    vel.x = accelerate_x(vel.x, dir, tuning.walk_accel, tuning.walk_max_speed, dt);
                }
            }
        }
        MovementState::Airborne => {
            player.charging = false;
            player.jump_charge = 0.0;
            vel.x = accelerate_x(
                vel.x,
                dir,
                tuning.walk_accel * tuning.air_control,
                tuning.walk_max_speed,
                dt,
            );
        }
    }

    vel.y += tuning.gravity * dt;

    if let Some(max_speed) = tuning.max_speed {
        *vel = vel.clamp_length_max(max_speed);
    }

    player.body.center += player.body.vel * dt;
    level.resolve(&mut player.body, tuning.player_response);

    player.state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::tilemap::{BoundaryPolicy, Tilemap};

    /// 8x6 room with a floor on the bottom row
    fn flat_level() -> Level {
        let rows = ["", "", "", "", "", "########"];
        let screen = Tilemap::from_rows(8, 6, &rows, BoundaryPolicy::default()).unwrap();
        Level::new(vec![screen], Vec2::new(4.0, 4.6)).unwrap()
    }

    fn resting_player(level: &Level, tuning: &Tuning) -> Player {
        let mut player = Player::new(level.spawn(), tuning.player_half_extent);
        for _ in 0..10 {
            update_player(&mut player, &PlayerInput::default(), level, tuning, SIM_DT);
        }
        player
    }

    #[test]
    fn test_falls_and_lands() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(4.0, 1.0), tuning.player_half_extent);

        let state = update_player(&mut player, &PlayerInput::default(), &level, &tuning, SIM_DT);
        assert_eq!(state, MovementState::Airborne);

        for _ in 0..240 {
            update_player(&mut player, &PlayerInput::default(), &level, &tuning, SIM_DT);
        }
        assert!(player.is_grounded());
        assert!((player.body.bottom() - 5.0).abs() < 1e-3);
        assert_eq!(player.body.vel.y, 0.0);
    }

    #[test]
    fn test_walks_with_input() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);
        let start_x = player.body.center.x;

        let input = PlayerInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            update_player(&mut player, &input, &level, &tuning, SIM_DT);
        }
        assert!(player.is_grounded());
        assert!(player.body.vel.x > 0.0);
        assert!(player.body.vel.x <= tuning.walk_max_speed + 1e-4);
        assert!(player.body.center.x > start_x);
    }

    #[test]
    fn test_friction_stops_player() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);
        player.body.vel.x = 3.0;

        for _ in 0..60 {
            update_player(&mut player, &PlayerInput::default(), &level, &tuning, SIM_DT);
        }
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn test_charging_zeroes_horizontal_velocity() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);
        player.body.vel.x = 3.0;

        let hold = PlayerInput {
            jump_held: true,
            jump_pressed: true,
            ..Default::default()
        };
        update_player(&mut player, &hold, &level, &tuning, SIM_DT);
        assert_eq!(player.body.vel.x, 0.0);
        assert!(player.charging);
        assert!(player.jump_charge > 0.0);
    }

    #[test]
    fn test_charged_jump_impulse() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);

        let press = PlayerInput {
            jump_held: true,
            jump_pressed: true,
            right: true,
            ..Default::default()
        };
        update_player(&mut player, &press, &level, &tuning, SIM_DT);
        let hold = PlayerInput {
            jump_pressed: false,
            ..press
        };
        // Hold well past the maximum charge
        for _ in 0..240 {
            update_player(&mut player, &hold, &level, &tuning, SIM_DT);
        }
        assert_eq!(player.body.vel.x, 0.0);

        let release = PlayerInput {
            jump_released: true,
            right: true,
            ..Default::default()
        };
        update_player(&mut player, &release, &level, &tuning, SIM_DT);

        let expected_vy = -tuning.jump_speed_max + tuning.gravity * SIM_DT;
        assert!((player.body.vel.y - expected_vy).abs() < 1e-4);
        assert_eq!(player.body.vel.x, tuning.jump_horizontal_speed);
        assert!(!player.charging);

        update_player(&mut player, &PlayerInput::default(), &level, &tuning, SIM_DT);
        assert_eq!(player.state, MovementState::Airborne);
    }

    #[test]
    fn test_tap_jump_uses_minimum_strength() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);

        let hold = PlayerInput {
            jump_held: true,
            jump_pressed: true,
            ..Default::default()
        };
        update_player(&mut player, &hold, &level, &tuning, SIM_DT);
        let release = PlayerInput {
            jump_released: true,
            ..Default::default()
        };
        update_player(&mut player, &release, &level, &tuning, SIM_DT);

        let expected_vy = -tuning.jump_speed_min + tuning.gravity * SIM_DT;
        assert!((player.body.vel.y - expected_vy).abs() < 1e-4);
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn test_release_without_charge_does_not_jump() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);

        let release = PlayerInput {
            jump_released: true,
            ..Default::default()
        };
        update_player(&mut player, &release, &level, &tuning, SIM_DT);
        assert!(player.body.vel.y >= 0.0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_jump_held_while_landing_does_not_charge() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(4.0, 3.0), tuning.player_half_extent);

        let hold = PlayerInput {
            jump_held: true,
            ..Default::default()
        };
        for _ in 0..240 {
            update_player(&mut player, &hold, &level, &tuning, SIM_DT);
        }
        assert!(player.is_grounded());
        assert!(!player.charging);
        assert_eq!(player.jump_charge, 0.0);
    }

    #[test]
    fn test_speed_cap() {
        let level = flat_level();
        let tuning = Tuning {
            max_speed: Some(5.0),
            ..Default::default()
        };
        let mut player = Player::new(Vec2::new(4.0, 1.0), tuning.player_half_extent);
        player.body.vel = Vec2::new(0.0, 50.0);

        update_player(&mut player, &PlayerInput::default(), &level, &tuning, SIM_DT);
        assert!(player.body.vel.length() <= 5.0 + 1e-4);
    }

    #[test]
    fn test_wall_stops_walking() {
        let level = flat_level();
        let tuning = Tuning::default();
        let mut player = resting_player(&level, &tuning);

        let input = PlayerInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            update_player(&mut player, &input, &level, &tuning, SIM_DT);
        }
        // Solid boundary on the right at x = 8
        assert!(player.body.center.x <= 8.0 - tuning.player_half_extent.x + 1e-4);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_airborne_wall_bounce() {
        let level = flat_level();
        let tuning = Tuning::default().with_wall_bounce(0.5);
        let mut player = Player::new(Vec2::new(7.65, 2.0), tuning.player_half_extent);
        player.body.vel = Vec2::new(10.0, 0.0);

        update_player(&mut player, &PlayerInput::default(), &level, &tuning, SIM_DT);
        assert!(player.body.vel.x < 0.0);
        assert!((player.body.center.x - 7.7).abs() < 1e-4);
    }
}
