//! Paddles on the arena rim
//!
//! A paddle is an angle plus a role. The role fixes which half of the ring
//! the paddle may occupy; moves that would leave it are dropped, not clamped.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use super::arc::ArcSegment;
use crate::config::SimConfig;
use crate::{normalize_angle, shortest_angular_diff};

/// Which part of the ring a paddle is confined to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleRole {
    /// Whole ring
    Solo,
    /// θ ∈ [π/2, 3π/2]
    Left,
    /// θ ∈ [3π/2, 2π) ∪ [0, π/2]
    Right,
}

impl PaddleRole {
    /// Check a candidate angle against this role's legal range
    pub fn permits(self, theta: f64) -> bool {
        let theta = normalize_angle(theta);
        match self {
            PaddleRole::Solo => true,
            PaddleRole::Left => (FRAC_PI_2..=3.0 * FRAC_PI_2).contains(&theta),
            PaddleRole::Right => theta >= 3.0 * FRAC_PI_2 || theta <= FRAC_PI_2,
        }
    }

    /// Angle a fresh paddle of this role starts at
    pub fn home_angle(self) -> f64 {
        match self {
            PaddleRole::Left => PI,
            PaddleRole::Solo | PaddleRole::Right => 0.0,
        }
    }
}

/// A paddle on the rim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Current angle (radians, center of paddle arc, [0, 2π))
    pub theta: f64,
    pub role: PaddleRole,
    /// Angular width of the paddle (radians)
    pub arc_width: f64,
    /// Arena radius the paddle sits on
    pub radius: f64,
    /// Physical length along the rim
    pub length: f64,
    /// Physical thickness (presentation only)
    pub width: f64,
    /// Radians per discrete step
    pub max_speed: f64,
    /// Largest turn `move_by` accepts in one call
    pub steer_limit: f64,
}

impl Paddle {
    pub fn new(role: PaddleRole, theta: f64, config: &SimConfig) -> Self {
        Self {
            theta: normalize_angle(theta),
            role,
            arc_width: config.paddle_arc_width(),
            radius: config.arena_radius,
            length: config.paddle_length,
            width: config.paddle_width,
            max_speed: config.paddle_speed,
            steer_limit: config.paddle_speed * config.ai_speed_factor,
        }
    }

    /// Get the paddle as an ArcSegment
    pub fn as_arc(&self) -> ArcSegment {
        ArcSegment::new(self.radius, self.theta, self.arc_width / 2.0)
    }

    /// Full-speed step in `direction` (sign only). Returns whether the paddle moved.
    pub fn move_step(&mut self, direction: i8) -> bool {
        let step = f64::from(direction.signum()) * self.max_speed;
        self.try_move(step)
    }

    /// Turn by `delta`, limited to the steering limit. Returns whether the paddle moved.
    pub fn move_by(&mut self, delta: f64) -> bool {
        let delta = delta.clamp(-self.steer_limit, self.steer_limit);
        self.try_move(delta)
    }

    fn try_move(&mut self, delta: f64) -> bool {
        let candidate = normalize_angle(self.theta + delta);
        if !self.role.permits(candidate) {
            return false;
        }
        self.theta = candidate;
        true
    }

    /// Check if a ball at `angle` is covered by this paddle
    pub fn is_within_arc(&self, angle: f64) -> bool {
        shortest_angular_diff(self.theta, angle).abs() <= self.arc_width / 2.0
    }
}
