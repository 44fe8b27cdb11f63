//! The ball: kinematics, serving, and paddle bounces

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::collision::{clamp_inside, reflect_velocity};
use crate::config::Difficulty;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Magnitudes at or below this are treated as "no direction"
const MIN_VELOCITY: f64 = 1e-12;

/// A ball entity (positions are relative to the arena center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Target magnitude of `vel`; re-applied on every bounce
    pub speed: f64,
    pub diameter: f64,
}

impl Ball {
    /// Create a ball at the center, already served in a random direction
    pub fn new<R: Rng + ?Sized>(diameter: f64, initial_speed: f64, rng: &mut R) -> Self {
        let mut ball = Self {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            speed: initial_speed,
            diameter,
        };
        ball.reset(initial_speed, rng);
        ball
    }

    /// Serve from the center in a uniformly random direction
    pub fn reset<R: Rng + ?Sized>(&mut self, initial_speed: f64, rng: &mut R) {
        let theta = rng.random::<f64>() * TAU;
        self.pos = DVec2::ZERO;
        self.speed = initial_speed;
        self.vel = polar_to_cartesian(initial_speed, theta);
    }

    /// One Euler step
    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn distance_from_center(&self) -> f64 {
        self.pos.length()
    }

    /// Angle of the ball as seen from the center, in [0, 2π)
    #[inline]
    pub fn angle_from_center(&self) -> f64 {
        cartesian_to_polar(self.pos).1
    }

    /// Bounce off a paddle sitting at `paddle_angle` on the rim
    ///
    /// Order matters: reflect, jitter, re-speed, then pull the ball back
    /// inside `arena_radius - diameter`. Without the final step the ball is
    /// still past the rim next tick and triggers another boundary contact.
    pub fn handle_paddle_collision<R: Rng + ?Sized>(
        &mut self,
        paddle_angle: f64,
        arena_radius: f64,
        difficulty: &Difficulty,
        rng: &mut R,
    ) {
        let normal = polar_to_cartesian(1.0, paddle_angle);
        let incoming = self.vel;

        let mut vel = reflect_velocity(incoming, normal);

        let jitter = difficulty.bounce_jitter;
        vel.x += (rng.random::<f64>() - 0.5) * jitter;
        vel.y += (rng.random::<f64>() - 0.5) * jitter;

        self.speed = difficulty.next_speed(self.speed);

        // Fall back to the old heading, then to straight inward
        let direction = [vel, incoming, -normal]
            .into_iter()
            .find(|v| v.is_finite() && v.length() > MIN_VELOCITY)
            .map(DVec2::normalize)
            .unwrap_or(-normal);
        self.vel = direction * self.speed;

        self.pos = clamp_inside(self.pos, arena_radius - self.diameter);
    }
}
