//! Game state and session commands
//!
//! Everything the round engine mutates lives here: the live seats for the
//! active mode, the ball, the scores, and the seeded RNG that drives serves,
//! bounce jitter, and AI error.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiController;
use super::ball::Ball;
use super::mode::{Controller, GameMode, ModeDescriptor, SeatSpec, Side};
use super::paddle::Paddle;
use crate::config::{Difficulty, SimConfig};

/// Points per side. Solo mode scores on the right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub left: u32,
    pub right: u32,
}

impl Scores {
    pub fn credit(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn reset_side(&mut self, side: Side) {
        match side {
            Side::Left => self.left = 0,
            Side::Right => self.right = 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// A live paddle and, for AI seats, its controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub side: Side,
    pub paddle: Paddle,
    pub ai: Option<AiController>,
}

impl Seat {
    fn build(side: Side, spec: &SeatSpec, config: &SimConfig) -> Self {
        let ai = match spec.controller {
            Controller::Human => None,
            Controller::Ai(tuning) => Some(AiController::new(tuning, config.prediction_steps)),
        };
        Self {
            side,
            paddle: Paddle::new(spec.role, spec.role.home_angle(), config),
            ai,
        }
    }

    pub fn is_human(&self) -> bool {
        self.ai.is_none()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Live-tunable ball speed parameters (survive resets)
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub descriptor: ModeDescriptor,
    pub left: Option<Seat>,
    pub right: Option<Seat>,
    pub ball: Ball,
    pub scores: Scores,
    pub paused: bool,
    /// Whether the presentation layer should draw the predicted intercept
    pub show_prediction: bool,
    /// Simulation tick counter (unpaused ticks only)
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session in `mode`, seeded with `seed`
    pub fn new(config: SimConfig, mode: GameMode, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let difficulty = config.difficulty;
        let ball = Ball::new(config.ball_diameter, difficulty.initial_ball_speed, &mut rng);
        let descriptor = mode.descriptor();

        let mut state = Self {
            left: None,
            right: None,
            config,
            difficulty,
            mode,
            descriptor,
            ball,
            scores: Scores::default(),
            paused: false,
            show_prediction: false,
            time_ticks: 0,
            rng,
        };
        state.build_seats();
        state
    }

    fn build_seats(&mut self) {
        self.left = self
            .descriptor
            .left
            .map(|spec| Seat::build(Side::Left, &spec, &self.config));
        self.right = self
            .descriptor
            .right
            .map(|spec| Seat::build(Side::Right, &spec, &self.config));
    }

    pub fn seat(&self, side: Side) -> Option<&Seat> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub fn seat_mut(&mut self, side: Side) -> Option<&mut Seat> {
        match side {
            Side::Left => self.left.as_mut(),
            Side::Right => self.right.as_mut(),
        }
    }

    /// Live seats in left-to-right order
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.left.iter().chain(self.right.iter())
    }

    fn ais_mut(&mut self) -> impl Iterator<Item = &mut AiController> {
        self.left
            .iter_mut()
            .chain(self.right.iter_mut())
            .filter_map(|seat| seat.ai.as_mut())
    }

    /// The AI whose tuning the HUD shows: right seat first, then left
    pub fn relevant_ai(&self) -> Option<&AiController> {
        self.right
            .as_ref()
            .and_then(|s| s.ai.as_ref())
            .or_else(|| self.left.as_ref().and_then(|s| s.ai.as_ref()))
    }

    /// Serve a fresh ball from the center
    pub fn serve(&mut self) {
        self.ball.reset(self.difficulty.initial_ball_speed, &mut self.rng);
    }

    /// Tear down and rebuild paddles, AIs, and ball for the current mode
    pub fn reset(&mut self) {
        self.scores.clear();
        self.paused = false;
        self.build_seats();
        self.serve();
        log::info!("Reset {} session", self.descriptor.name);
    }

    /// Switch mode; always a full reset
    pub fn select_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.descriptor = mode.descriptor();
        log::info!("Mode changed to {}", self.descriptor.name);
        self.reset();
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_prediction(&mut self) {
        self.show_prediction = !self.show_prediction;
    }

    /// Applies to every live AI
    pub fn adjust_ai_responsiveness(&mut self, delta: f64) {
        for ai in self.ais_mut() {
            ai.adjust_responsiveness(delta);
        }
    }

    /// Applies to every live AI
    pub fn adjust_ai_accuracy(&mut self, delta: f64) {
        for ai in self.ais_mut() {
            ai.adjust_accuracy(delta);
        }
    }

    pub fn adjust_max_ball_speed(&mut self, delta: f64) {
        self.difficulty.adjust_max_ball_speed(delta);
    }

    pub fn adjust_speed_increment(&mut self, delta: f64) {
        self.difficulty.adjust_speed_increment(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::paddle::PaddleRole;
    use glam::DVec2;

    #[test]
    fn test_new_session_matches_mode() {
        let state = GameState::new(SimConfig::default(), GameMode::HumanVsAi, 42);
        let left = state.left.as_ref().unwrap();
        let right = state.right.as_ref().unwrap();
        assert!(left.is_human());
        assert!(!right.is_human());
        assert_eq!(left.paddle.role, PaddleRole::Left);
        assert!((left.paddle.theta - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(state.ball.pos, DVec2::ZERO);
        assert_eq!(state.scores, Scores::default());
    }

    #[test]
    fn test_switch_to_solo_drops_left_seat() {
        let mut state = GameState::new(SimConfig::default(), GameMode::TwoHuman, 42);
        state.scores = Scores { left: 3, right: 5 };
        state.ball.pos = DVec2::new(50.0, 50.0);

        state.select_mode(GameMode::AiSolo);

        assert!(state.left.is_none());
        assert_eq!(state.seats().count(), 1);
        let solo = state.right.as_ref().unwrap();
        assert_eq!(solo.paddle.role, PaddleRole::Solo);
        assert!(solo.ai.is_some());
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.ball.pos, DVec2::ZERO);
    }

    #[test]
    fn test_reset_unpauses_and_keeps_difficulty() {
        let mut state = GameState::new(SimConfig::default(), GameMode::TwoAi, 1);
        state.toggle_pause();
        state.adjust_speed_increment(SPEED_INCREMENT_STEP);
        state.adjust_ai_accuracy(-ACCURACY_STEP);
        assert!(state.paused);

        state.reset();

        assert!(!state.paused);
        assert!((state.difficulty.speed_increment - 0.205).abs() < 1e-12);
        // AI tuning goes back to the mode defaults
        assert_eq!(state.relevant_ai().unwrap().tuning.accuracy, 0.9);
    }

    #[test]
    fn test_ai_adjustments_reach_every_ai() {
        let mut state = GameState::new(SimConfig::default(), GameMode::TwoAi, 1);
        state.adjust_ai_responsiveness(RESPONSIVENESS_STEP);
        for seat in state.seats() {
            let tuning = seat.ai.as_ref().unwrap().tuning;
            assert!((tuning.responsiveness - 0.11).abs() < 1e-12);
        }

        // No AI to adjust, nothing to report
        state.select_mode(GameMode::TwoHuman);
        state.adjust_ai_accuracy(ACCURACY_STEP);
        assert!(state.relevant_ai().is_none());
    }

    #[test]
    fn test_scores_credit_and_clear() {
        let mut scores = Scores::default();
        scores.credit(Side::Left);
        scores.credit(Side::Right);
        scores.credit(Side::Right);
        assert_eq!(scores.get(Side::Left), 1);
        assert_eq!(scores.get(Side::Right), 2);
        scores.clear();
        assert_eq!(scores, Scores::default());
    }
}
