//! Arrow-key ball
//!
//! Pushed around on both axes by the direction keys, bounces off walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Hitbox, ResolveReport};
use crate::level::Level;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Hitbox,
}

impl Ball {
    pub fn new(spawn: Vec2, half_extent: Vec2) -> Self {
        Self {
            body: Hitbox::new(spawn, half_extent),
        }
    }
}

/// Advance the ball by one tick
///
/// `dir` is the held direction, each component in -1..=1.
pub fn update_ball(ball: &mut Ball, dir: Vec2, level: &Level, tuning: &Tuning, dt: f32) -> ResolveReport {
    let vel = &mut ball.body.vel;
    *vel += dir * tuning.ball_accel * dt;
    vel.y += tuning.ball_gravity * dt;
    *vel *= (-tuning.ball_damping * dt).exp();

    if let Some(max_speed) = tuning.max_speed {
        *vel = vel.clamp_length_max(max_speed);
    }

    ball.body.center += ball.body.vel * dt;
    level.resolve(&mut ball.body, tuning.ball_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::tilemap::{BoundaryPolicy, Tilemap};

    fn open_room() -> Level {
        let screen = Tilemap::new(8, 8, BoundaryPolicy::solid()).unwrap();
        Level::new(vec![screen], Vec2::new(4.0, 4.0)).unwrap()
    }

    #[test]
    fn test_moves_with_arrows() {
        let level = open_room();
        let tuning = Tuning::default();
        let mut ball = Ball::new(level.spawn(), tuning.ball_half_extent);

        for _ in 0..30 {
            update_ball(&mut ball, Vec2::new(1.0, -1.0), &level, &tuning, SIM_DT);
        }
        assert!(ball.body.center.x > 4.0);
        assert!(ball.body.center.y < 4.0);
    }

    #[test]
    fn test_bounces_off_wall() {
        let level = open_room();
        let tuning = Tuning {
            ball_damping: 0.0,
            ..Default::default()
        };
        let mut ball = Ball::new(Vec2::new(7.72, 4.0), tuning.ball_half_extent);
        ball.body.vel = Vec2::new(6.0, 0.0);

        let report = update_ball(&mut ball, Vec2::ZERO, &level, &tuning, SIM_DT);

        assert!(report.clipped_x);
        assert!((ball.body.vel.x - (-6.0 * tuning.ball_bounce)).abs() < 1e-4);
        assert!((ball.body.center.x - 7.75).abs() < 1e-4);
    }

    #[test]
    fn test_damping_slows_ball() {
        let level = open_room();
        let tuning = Tuning::default();
        let mut ball = Ball::new(level.spawn(), tuning.ball_half_extent);
        ball.body.vel = Vec2::new(2.0, 0.0);

        update_ball(&mut ball, Vec2::ZERO, &level, &tuning, SIM_DT);
        assert!(ball.body.vel.x < 2.0 && ball.body.vel.x > 0.0);
    }
}
