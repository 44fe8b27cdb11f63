//! Collision helpers for the circular boundary
//!
//! The arena is a circle centered on the origin. The ball "touches" the
//! boundary once its center is within half a diameter of the rim; paddles
//! live on the rim, so every paddle hit is also a boundary contact.

use glam::DVec2;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Distance from the center at which a ball of `diameter` touches the rim
#[inline]
pub fn contact_distance(arena_radius: f64, diameter: f64) -> f64 {
    arena_radius - diameter / 2.0
}

/// Check whether a ball centered at `pos` is touching or past the rim
#[inline]
pub fn touches_boundary(pos: DVec2, diameter: f64, arena_radius: f64) -> bool {
    pos.length() >= contact_distance(arena_radius, diameter)
}

/// Pull a point radially inward so it lies no further than `max_dist` from the center
///
/// Points already inside are returned unchanged.
pub fn clamp_inside(pos: DVec2, max_dist: f64) -> DVec2 {
    let dist = pos.length();
    if dist > max_dist && dist > 0.0 {
        pos * (max_dist / dist)
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use std::f64::consts::PI;

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, paddle at angle π (normal pointing left)
        let velocity = DVec2::new(1.0, 0.0);
        let normal = polar_to_cartesian(1.0, PI);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-1.0)).abs() < 1e-12);
        assert!(reflected.y.abs() < 1e-12);
    }

    #[test]
    fn test_reflect_keeps_tangential_component() {
        let velocity = DVec2::new(3.0, 4.0);
        let reflected = reflect_velocity(velocity, DVec2::X);
        assert!((reflected - DVec2::new(-3.0, 4.0)).length() < 1e-12);
        assert!((reflected.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_contact() {
        let radius = 300.0;
        assert!(!touches_boundary(DVec2::new(200.0, 0.0), 15.0, radius));
        assert!(touches_boundary(DVec2::new(292.5, 0.0), 15.0, radius));
        assert!(touches_boundary(DVec2::new(0.0, -310.0), 15.0, radius));
    }

    #[test]
    fn test_clamp_inside() {
        let p = clamp_inside(DVec2::new(0.0, 295.0), 285.0);
        assert!((p - DVec2::new(0.0, 285.0)).length() < 1e-9);

        let inside = DVec2::new(10.0, 10.0);
        assert_eq!(clamp_inside(inside, 285.0), inside);
        assert_eq!(clamp_inside(DVec2::ZERO, 0.0), DVec2::ZERO);
    }
}
