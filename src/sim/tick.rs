//! Fixed timestep simulation tick
//!
//! Advances the player and the ball deterministically from key levels.

use glam::Vec2;

use super::ball::update_ball;
use super::player::{MovementState, PlayerInput, update_player};
use super::state::GameState;

/// Key levels for a single tick
///
/// Edges (jump pressed/released) are derived from the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump_held: bool,
}

impl TickInput {
    /// Direction keys as a vector (Y down)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let player_input = PlayerInput {
        left: input.left,
        right: input.right,
        jump_held: input.jump_held,
        jump_pressed: input.jump_held && !state.prev_jump_held,
        jump_released: !input.jump_held && state.prev_jump_held,
    };
    state.prev_jump_held = input.jump_held;

    let was = state.player.state;
    let now = update_player(
        &mut state.player,
        &player_input,
        &state.level,
        &state.tuning,
        dt,
    );
    if was != now {
        log::debug!("Player {:?} -> {:?} at tick {}", was, now, state.time_ticks);
        if now == MovementState::Grounded {
            log::trace!(
                "Landed at ({:.2}, {:.2})",
                state.player.body.center.x,
                state.player.body.center.y
            );
        }
    }

    if state.player.body.min().y > state.level.bottom() {
        log::info!("Player fell out of the level at tick {}, respawning", state.time_ticks);
        state.respawn();
    }

    if let Some(ball) = &mut state.ball {
        update_ball(ball, input.direction(), &state.level, &state.tuning, dt);
    }

    let screen = state.level.screen_index_at(state.player.body.center.y);
    if screen != state.camera_screen {
        log::info!("Camera: screen {} -> {}", state.camera_screen, screen);
        state.camera_screen = screen;
    }

    state.time_ticks += 1;
}
