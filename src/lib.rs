//! Circle Pong - paddles on a ring, a ball bouncing inside it
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, AI, round engine)
//! - `config`: Owned simulation configuration loaded from JSON
//! - `driver`: Fixed-rate tick thread with atomic control flags

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, Difficulty, SimConfig};
pub use driver::{Command, DriverHandle, TickDriver};

use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;

    /// Arena dimensions
    pub const ARENA_RADIUS: f64 = 300.0;

    /// Paddle defaults - length is measured along the circumference
    pub const PADDLE_LENGTH: f64 = 70.0;
    pub const PADDLE_WIDTH: f64 = 15.0;
    /// Radians per tick
    pub const PADDLE_SPEED: f64 = 0.045;

    /// Ball defaults (speeds are in arena units per tick)
    pub const BALL_DIAMETER: f64 = 15.0;
    pub const INITIAL_BALL_SPEED: f64 = 4.0;
    pub const SPEED_INCREMENT_ON_HIT: f64 = 0.2;
    pub const MAX_BALL_SPEED: f64 = 8.0;
    /// Full width of the per-component bounce jitter
    pub const BOUNCE_JITTER: f64 = 0.2;

    /// How far ahead the AI extrapolates the ball (ticks)
    pub const PREDICTION_STEPS: u32 = 120;
    /// Held aim error scale (radians at zero accuracy)
    pub const INACCURACY_SCALE: f64 = 0.6;
    /// Ticks an aim error is held before re-rolling: [min, max)
    pub const REROLL_MIN_TICKS: u32 = 10;
    pub const REROLL_MAX_TICKS: u32 = 25;

    /// Limits and step sizes for live difficulty adjustment
    pub const AI_RESPONSIVENESS_MIN: f64 = 0.04;
    pub const AI_RESPONSIVENESS_MAX: f64 = 0.25;
    pub const AI_ACCURACY_MIN: f64 = 0.2;
    pub const AI_ACCURACY_MAX: f64 = 1.0;
    pub const RESPONSIVENESS_STEP: f64 = 0.01;
    pub const ACCURACY_STEP: f64 = 0.05;
    pub const MAX_SPEED_STEP: f64 = 0.05;
    pub const SPEED_INCREMENT_STEP: f64 = 0.005;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut angle = angle % TAU;
    if angle < 0.0 {
        angle += TAU;
    }
    // -tiny % TAU + TAU rounds up to exactly TAU
    if angle >= TAU { 0.0 } else { angle }
}

/// Signed shortest rotation taking `from` to `to`, in (-π, π]
#[inline]
pub fn shortest_angular_diff(from: f64, to: f64) -> f64 {
    let diff = normalize_angle(to) - normalize_angle(from);
    if diff > PI {
        diff - TAU
    } else if diff <= -PI {
        diff + TAU
    } else {
        diff
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta), theta in [0, 2π)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), normalize_angle(pos.y.atan2(pos.x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_angle_basics() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-9);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
    }

    #[test]
    fn test_shortest_diff_across_seam() {
        // 350° -> 10° is +20°, not -340°
        let d = shortest_angular_diff(350f64.to_radians(), 10f64.to_radians());
        assert!((d - 20f64.to_radians()).abs() < 1e-9);

        let d = shortest_angular_diff(10f64.to_radians(), 350f64.to_radians());
        assert!((d + 20f64.to_radians()).abs() < 1e-9);

        // Exactly opposite resolves to +π
        assert!((shortest_angular_diff(0.0, PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_polar_roundtrip_quadrants() {
        let (r, theta) = cartesian_to_polar(DVec2::new(0.0, -2.0));
        assert!((r - 2.0).abs() < 1e-12);
        assert!((theta - 3.0 * PI / 2.0).abs() < 1e-12);

        let p = polar_to_cartesian(10.0, PI);
        assert!((p.x + 10.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn normalized_angle_in_range(theta in -1.0e6f64..1.0e6) {
            let n = normalize_angle(theta);
            prop_assert!((0.0..TAU).contains(&n));
        }

        #[test]
        fn normalize_is_periodic(theta in -100.0f64..100.0, k in -50i32..50) {
            let a = normalize_angle(theta);
            let b = normalize_angle(theta + TAU * f64::from(k));
            // Compare on the circle: 0 and 2π-ε are neighbours
            prop_assert!(shortest_angular_diff(a, b).abs() < 1e-9);
        }

        #[test]
        fn shortest_diff_in_half_open_range(a in -20.0f64..20.0, b in -20.0f64..20.0) {
            let d = shortest_angular_diff(a, b);
            prop_assert!(d > -PI && d <= PI);
            // Applying the diff lands on the target
            prop_assert!(shortest_angular_diff(a + d, b).abs() < 1e-9);
        }
    }
}
