//! Read-only per-frame view of the simulation
//!
//! The presentation layer never touches [`GameState`] directly; it reads a
//! snapshot taken after each tick. Everything here is plain data.

use serde::Serialize;

use super::ai::predict_intercept;
use super::mode::{GameMode, Side};
use super::paddle::PaddleRole;
use super::state::{GameState, Scores, Seat};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub speed: f64,
    /// Angle from the arena center, [0, 2π)
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleView {
    pub side: Side,
    /// Also serves as the color tag
    pub role: PaddleRole,
    pub label: &'static str,
    pub ai_controlled: bool,
    pub angle: f64,
    pub arc_width: f64,
    pub length: f64,
    pub width: f64,
    /// Cartesian ends of the paddle arc, relative to the arena center
    pub start: (f64, f64),
    pub end: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub mode: GameMode,
    pub mode_name: &'static str,
    pub paused: bool,
    pub arena_radius: f64,
    pub ball: BallView,
    /// Where the AI expects the ball to meet the rim (ghost ball)
    pub predicted_intercept: Option<f64>,
    pub show_prediction: bool,
    pub paddles: Vec<PaddleView>,
    pub scores: Scores,
    pub ai_responsiveness: Option<f64>,
    pub ai_accuracy: Option<f64>,
    pub max_ball_speed: f64,
    pub speed_increment: f64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let ball = &state.ball;
        let ai = state.relevant_ai();

        Self {
            tick: state.time_ticks,
            mode: state.mode,
            mode_name: state.descriptor.name,
            paused: state.paused,
            arena_radius: state.config.arena_radius,
            ball: BallView {
                x: ball.pos.x,
                y: ball.pos.y,
                diameter: ball.diameter,
                speed: ball.speed,
                angle: ball.angle_from_center(),
            },
            predicted_intercept: predict_intercept(
                ball,
                state.config.arena_radius,
                state.config.prediction_steps,
            ),
            show_prediction: state.show_prediction,
            paddles: state.seats().map(|seat| paddle_view(state, seat)).collect(),
            scores: state.scores,
            ai_responsiveness: ai.map(|ai| ai.tuning.responsiveness),
            ai_accuracy: ai.map(|ai| ai.tuning.accuracy),
            max_ball_speed: state.difficulty.max_ball_speed,
            speed_increment: state.difficulty.speed_increment,
        }
    }

    pub fn paddle(&self, side: Side) -> Option<&PaddleView> {
        self.paddles.iter().find(|p| p.side == side)
    }

    pub fn score_label(&self, side: Side) -> Option<&'static str> {
        self.paddle(side).map(|p| p.label)
    }
}

fn paddle_view(state: &GameState, seat: &Seat) -> PaddleView {
    let paddle = &seat.paddle;
    let (start, end) = paddle.as_arc().endpoints();
    let label = state
        .descriptor
        .seat(seat.side)
        .map(|spec| spec.label)
        .unwrap_or_default();

    PaddleView {
        side: seat.side,
        role: paddle.role,
        label,
        ai_controlled: !seat.is_human(),
        angle: paddle.theta,
        arc_width: paddle.arc_width,
        length: paddle.length,
        width: paddle.width,
        start: (start.x, start.y),
        end: (end.x, end.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use glam::DVec2;

    #[test]
    fn test_snapshot_reflects_solo_session() {
        let state = GameState::new(SimConfig::default(), GameMode::AiSolo, 3);
        let snap = Snapshot::capture(&state);

        assert_eq!(snap.mode_name, "AI Solo");
        assert_eq!(snap.paddles.len(), 1);
        assert!(snap.paddle(Side::Left).is_none());
        let solo = snap.paddle(Side::Right).unwrap();
        assert_eq!(solo.role, PaddleRole::Solo);
        assert!(solo.ai_controlled);
        assert_eq!(snap.ai_accuracy, Some(0.95));
        assert_eq!((snap.ball.x, snap.ball.y), (0.0, 0.0));
        // Served at speed 4 from the center: reaches the rim well within 120 ticks
        assert!(snap.predicted_intercept.is_some());
    }

    #[test]
    fn test_snapshot_two_human_has_no_ai_settings() {
        let mut state = GameState::new(SimConfig::default(), GameMode::TwoHuman, 3);
        state.ball.vel = DVec2::ZERO;
        let snap = Snapshot::capture(&state);

        assert_eq!(snap.ai_responsiveness, None);
        assert_eq!(snap.predicted_intercept, None);
        assert_eq!(snap.score_label(Side::Left), Some("Player 1"));
        assert_eq!(snap.score_label(Side::Right), Some("Player 2"));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let state = GameState::new(SimConfig::default(), GameMode::TwoAi, 3);
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        assert_eq!(json["mode"], "TwoAi");
        assert_eq!(json["paddles"].as_array().unwrap().len(), 2);
        assert_eq!(json["scores"]["left"], 0);
    }
}
