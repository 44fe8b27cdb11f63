//! Predictive AI paddle controller
//!
//! Each tick the controller extrapolates the ball in a straight line to the
//! rim, aims at that point plus a held error, and turns the paddle a fixed
//! fraction of the remaining gap. The error is re-rolled every 10-25 ticks
//! rather than every tick so the paddle does not visibly shake.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::contact_distance;
use super::paddle::Paddle;
use crate::consts::{
    AI_ACCURACY_MAX, AI_ACCURACY_MIN, AI_RESPONSIVENESS_MAX, AI_RESPONSIVENESS_MIN,
    INACCURACY_SCALE, REROLL_MAX_TICKS, REROLL_MIN_TICKS,
};
use crate::{cartesian_to_polar, shortest_angular_diff};

/// Skill settings for one AI seat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiTuning {
    /// Fraction of the remaining angular error corrected per tick
    pub responsiveness: f64,
    /// Probability a re-roll yields zero aim error
    pub accuracy: f64,
}

impl AiTuning {
    pub const fn new(responsiveness: f64, accuracy: f64) -> Self {
        Self {
            responsiveness,
            accuracy,
        }
    }
}

/// Where the ball will meet the rim if nothing deflects it
///
/// Steps the ball forward with its current velocity for at most `steps`
/// ticks. Returns `None` if it never gets there (too slow, or stopped).
/// Bounces off the other paddle are deliberately not modelled.
pub fn predict_intercept(ball: &Ball, arena_radius: f64, steps: u32) -> Option<f64> {
    let limit = contact_distance(arena_radius, ball.diameter);
    let mut pos = ball.pos;
    for _ in 0..steps {
        pos += ball.vel;
        let (dist, theta) = cartesian_to_polar(pos);
        if dist >= limit {
            return Some(theta);
        }
    }
    None
}

/// Controls an AI paddle using proportional steering and a held aim error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiController {
    pub tuning: AiTuning,
    /// Ticks of extrapolation per prediction
    pub prediction_steps: u32,
    /// Current aim error (radians), constant between re-rolls
    inaccuracy_offset: f64,
    /// Ticks until the error is re-rolled
    reroll_countdown: u32,
}

impl AiController {
    pub fn new(tuning: AiTuning, prediction_steps: u32) -> Self {
        Self {
            tuning,
            prediction_steps,
            inaccuracy_offset: 0.0,
            reroll_countdown: 0,
        }
    }

    pub fn inaccuracy_offset(&self) -> f64 {
        self.inaccuracy_offset
    }

    pub fn predict_intercept(&self, ball: &Ball, arena_radius: f64) -> Option<f64> {
        predict_intercept(ball, arena_radius, self.prediction_steps)
    }

    /// Run one tick of AI control. Does nothing when no intercept is predicted.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        arena_radius: f64,
        rng: &mut R,
    ) {
        if let Some(predicted) = self.predict_intercept(ball, arena_radius) {
            self.steer(paddle, predicted, rng);
        }
    }

    /// Turn the paddle toward `predicted` plus the held error
    pub fn steer<R: Rng + ?Sized>(&mut self, paddle: &mut Paddle, predicted: f64, rng: &mut R) {
        self.reroll_countdown = self.reroll_countdown.saturating_sub(1);
        if self.reroll_countdown == 0 {
            self.reroll(rng);
        }

        let target = predicted + self.inaccuracy_offset;
        let error = shortest_angular_diff(paddle.theta, target);
        paddle.move_by(error * self.tuning.responsiveness);
    }

    fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let accuracy = self.tuning.accuracy;
        self.inaccuracy_offset = if rng.random::<f64>() > accuracy {
            (rng.random::<f64>() - 0.5) * (1.0 - accuracy) * INACCURACY_SCALE
        } else {
            0.0
        };
        self.reroll_countdown = rng.random_range(REROLL_MIN_TICKS..REROLL_MAX_TICKS);
    }

    pub fn adjust_responsiveness(&mut self, delta: f64) {
        self.tuning.responsiveness = (self.tuning.responsiveness + delta)
            .clamp(AI_RESPONSIVENESS_MIN, AI_RESPONSIVENESS_MAX);
    }

    pub fn adjust_accuracy(&mut self, delta: f64) {
        self.tuning.accuracy = (self.tuning.accuracy + delta).clamp(AI_ACCURACY_MIN, AI_ACCURACY_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::paddle::PaddleRole;
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn ball_at(pos: DVec2, vel: DVec2) -> Ball {
        let mut ball = Ball::new(15.0, 4.0, &mut Pcg32::seed_from_u64(1));
        ball.pos = pos;
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_predicts_straight_line_intercept() {
        let ball = ball_at(DVec2::ZERO, DVec2::new(0.0, 4.0));
        let angle = predict_intercept(&ball, 300.0, 120).unwrap();
        assert!((angle - FRAC_PI_2).abs() < 1e-9);

        let ball = ball_at(DVec2::new(0.0, 100.0), DVec2::new(-4.0, 0.0));
        let angle = predict_intercept(&ball, 300.0, 120).unwrap();
        // Exits on the left, upper half
        assert!(angle > FRAC_PI_2 && angle < PI);
    }

    #[test]
    fn test_prediction_misses_when_too_slow() {
        // 120 ticks at 1 unit/tick never reaches 292.5
        let ball = ball_at(DVec2::ZERO, DVec2::new(1.0, 0.0));
        assert_eq!(predict_intercept(&ball, 300.0, 120), None);

        let ball = ball_at(DVec2::ZERO, DVec2::ZERO);
        assert_eq!(predict_intercept(&ball, 300.0, 120), None);
    }

    #[test]
    fn test_step_without_prediction_does_nothing() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ai = AiController::new(AiTuning::new(0.1, 0.9), 120);
        let mut paddle = Paddle::new(PaddleRole::Solo, 1.0, &SimConfig::default());
        let ball = ball_at(DVec2::ZERO, DVec2::ZERO);

        ai.step(&mut paddle, &ball, 300.0, &mut rng);
        assert_eq!(paddle.theta, 1.0);
    }

    #[test]
    fn test_perfect_ai_converges_geometrically() {
        let mut rng = Pcg32::seed_from_u64(11);
        let responsiveness = 0.1;
        let mut ai = AiController::new(AiTuning::new(responsiveness, 1.0), 120);
        let mut paddle = Paddle::new(PaddleRole::Solo, 0.3, &SimConfig::default());
        let target = 0.0;

        let mut previous = shortest_angular_diff(paddle.theta, target).abs();
        let initial = previous;
        for n in 1..=40 {
            ai.steer(&mut paddle, target, &mut rng);
            assert_eq!(ai.inaccuracy_offset(), 0.0);

            let error = shortest_angular_diff(paddle.theta, target).abs();
            assert!(error < previous);
            let expected = initial * (1.0 - responsiveness).powi(n);
            assert!((error - expected).abs() < 1e-9);
            previous = error;
        }
    }

    #[test]
    fn test_offset_is_held_between_rerolls() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ai = AiController::new(AiTuning::new(0.1, 0.0), 120);
        let mut paddle = Paddle::new(PaddleRole::Solo, 0.0, &SimConfig::default());

        ai.steer(&mut paddle, 0.0, &mut rng);
        let held = ai.inaccuracy_offset();
        assert!(held.abs() <= 0.5 * INACCURACY_SCALE);
        let window = ai.reroll_countdown;
        assert!((REROLL_MIN_TICKS..REROLL_MAX_TICKS).contains(&window));

        // Offset stays fixed for the rest of the window
        for _ in 1..window {
            ai.steer(&mut paddle, 0.0, &mut rng);
            assert_eq!(ai.inaccuracy_offset(), held);
        }
    }

    #[test]
    fn test_tuning_adjustments_clamp() {
        let mut ai = AiController::new(AiTuning::new(0.1, 0.9), 120);
        ai.adjust_responsiveness(1.0);
        assert_eq!(ai.tuning.responsiveness, AI_RESPONSIVENESS_MAX);
        ai.adjust_accuracy(-5.0);
        assert_eq!(ai.tuning.accuracy, AI_ACCURACY_MIN);
    }
}
