//! Game state and camera
//!
//! Everything the tick mutates lives here. The level and tuning are fixed
//! for the lifetime of a state.

use glam::Vec2;

use super::ball::Ball;
use super::player::Player;
use crate::level::Level;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct GameState {
    pub level: Level,
    pub tuning: Tuning,
    pub player: Player,
    /// Present when the level has a ball spawn
    pub ball: Option<Ball>,
    /// Screen the camera is showing
    pub camera_screen: usize,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Jump key level on the previous tick, for edge detection
    pub(crate) prev_jump_held: bool,
}

impl GameState {
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let player = Player::new(level.spawn(), tuning.player_half_extent);
        let ball = level
            .ball_spawn()
            .map(|spawn| Ball::new(spawn, tuning.ball_half_extent));
        let camera_screen = level.screen_index_at(player.body.center.y);

        log::info!(
            "New game: spawn=({:.1}, {:.1}) screen={} ball={}",
            player.body.center.x,
            player.body.center.y,
            camera_screen,
            ball.is_some()
        );

        Self {
            level,
            tuning,
            player,
            ball,
            camera_screen,
            time_ticks: 0,
            prev_jump_held: false,
        }
    }

    /// Put the player back on the spawn point
    pub fn respawn(&mut self) {
        self.player = Player::new(self.level.spawn(), self.tuning.player_half_extent);
        self.camera_screen = self.level.screen_index_at(self.player.body.center.y);
        self.prev_jump_held = false;
    }

    /// World-space offset the host should subtract when drawing
    pub fn camera_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.level.screen_offset(self.camera_screen))
    }

    /// Text for the host's debug overlay
    pub fn debug_lines(&self) -> Vec<String> {
        let body = &self.player.body;
        let mut lines = vec![
            format!("pos: ({:.2}, {:.2})", body.center.x, body.center.y),
            format!("vel: ({:.2}, {:.2})", body.vel.x, body.vel.y),
            format!("state: {:?}", self.player.state),
            format!("charge: {:.2}s", self.player.jump_charge),
            format!("screen: {}/{}", self.camera_screen + 1, self.level.screen_count()),
            format!("tick: {}", self.time_ticks),
        ];
        if let Some(ball) = &self.ball {
            lines.push(format!(
                "ball: ({:.2}, {:.2})",
                ball.body.center.x, ball.body.center.y
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level;

    #[test]
    fn test_new_state_from_builtin() {
        let state = GameState::new(level::builtin().unwrap(), Tuning::default());
        assert_eq!(state.camera_screen, 1);
        assert!(state.ball.is_some());
        assert_eq!(state.camera_offset(), Vec2::new(0.0, 10.0));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_debug_lines() {
        let state = GameState::new(level::builtin().unwrap(), Tuning::default());
        let lines = state.debug_lines();
        assert!(lines[0].starts_with("pos: (2.50, 18.50)"));
        assert!(lines.iter().any(|l| l == "screen: 2/2"));
        assert!(lines.iter().any(|l| l.starts_with("ball:")));
    }
}
