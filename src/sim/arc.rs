//! Angular span of a paddle on the arena circumference
//!
//! In polar coordinates a paddle covers:
//! - radius: the arena radius (paddles sit on the boundary)
//! - theta: the midpoint angle
//! - half_width: angular half-length (physical length / radius / 2)

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, polar_to_cartesian, shortest_angular_diff};

/// An arc of the arena boundary, centered on `theta`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    /// Radius the arc lies on
    pub radius: f64,
    /// Midpoint angle (radians, normalized to [0, 2π))
    pub theta: f64,
    /// Half of the angular span (radians)
    pub half_width: f64,
}

impl ArcSegment {
    pub fn new(radius: f64, theta: f64, half_width: f64) -> Self {
        Self {
            radius,
            theta: normalize_angle(theta),
            half_width,
        }
    }

    /// Full angular span of the arc
    #[inline]
    pub fn angular_span(&self) -> f64 {
        self.half_width * 2.0
    }

    /// Start angle (clockwise end)
    pub fn theta_start(&self) -> f64 {
        normalize_angle(self.theta - self.half_width)
    }

    /// End angle (counter-clockwise end)
    pub fn theta_end(&self) -> f64 {
        normalize_angle(self.theta + self.half_width)
    }

    /// Check if an angle is within the arc's angular extent (handles the 0/2π seam)
    pub fn contains_angle(&self, theta: f64) -> bool {
        shortest_angular_diff(self.theta, theta).abs() <= self.half_width
    }

    /// Cartesian endpoints of the arc
    pub fn endpoints(&self) -> (DVec2, DVec2) {
        (
            polar_to_cartesian(self.radius, self.theta_start()),
            polar_to_cartesian(self.radius, self.theta_end()),
        )
    }

    /// Midpoint of the arc in cartesian space
    pub fn center(&self) -> DVec2 {
        polar_to_cartesian(self.radius, self.theta)
    }

    /// Sample points along the arc (for drawing curved paddles)
    pub fn sample_points(&self, num_points: usize) -> Vec<DVec2> {
        let start = self.theta - self.half_width;
        let span = self.angular_span();

        (0..num_points)
            .map(|i| {
                let t = i as f64 / num_points.saturating_sub(1).max(1) as f64;
                polar_to_cartesian(self.radius, start + t * span)
            })
            .collect()
    }
}
