//! Simulation configuration
//!
//! One owned struct handed to the session at construction. Difficulty
//! parameters that can be tuned live are grouped in [`Difficulty`] so the
//! round engine and the ball read them from the same place.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Ball speed parameters (all in arena units per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    /// Speed the ball is served at after every reset
    pub initial_ball_speed: f64,
    /// Added to the ball speed on every paddle hit (0 = constant speed)
    pub speed_increment: f64,
    /// Cap applied after the increment
    pub max_ball_speed: f64,
    /// Full width of the random kick added to each velocity component on a bounce
    pub bounce_jitter: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            initial_ball_speed: INITIAL_BALL_SPEED,
            speed_increment: SPEED_INCREMENT_ON_HIT,
            max_ball_speed: MAX_BALL_SPEED,
            bounce_jitter: BOUNCE_JITTER,
        }
    }
}

impl Difficulty {
    /// Speed after one more paddle hit
    pub fn next_speed(&self, current: f64) -> f64 {
        (current + self.speed_increment).min(self.max_ball_speed)
    }

    /// Nudge the speed cap, never below the serve speed
    pub fn adjust_max_ball_speed(&mut self, delta: f64) {
        self.max_ball_speed = (self.max_ball_speed + delta).max(self.initial_ball_speed);
    }

    /// Nudge the per-hit increment, never negative
    pub fn adjust_speed_increment(&mut self, delta: f64) {
        self.speed_increment = (self.speed_increment + delta).max(0.0);
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Radius of the arena circle
    pub arena_radius: f64,
    /// Paddle length along the circumference
    pub paddle_length: f64,
    /// Paddle thickness (presentation only)
    pub paddle_width: f64,
    /// Radians per tick a paddle may turn
    pub paddle_speed: f64,
    /// Multiplier on `paddle_speed` granted to AI steering
    pub ai_speed_factor: f64,
    pub ball_diameter: f64,
    /// Ticks of straight-line extrapolation the AI runs per prediction
    pub prediction_steps: u32,
    /// Tick driver rate
    pub tick_rate_hz: u32,
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_radius: ARENA_RADIUS,
            paddle_length: PADDLE_LENGTH,
            paddle_width: PADDLE_WIDTH,
            paddle_speed: PADDLE_SPEED,
            ai_speed_factor: 1.0,
            ball_diameter: BALL_DIAMETER,
            prediction_steps: PREDICTION_STEPS,
            tick_rate_hz: SIM_HZ,
            seed: None,
            difficulty: Difficulty::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_radius", self.arena_radius),
            ("paddle_length", self.paddle_length),
            ("paddle_width", self.paddle_width),
            ("paddle_speed", self.paddle_speed),
            ("ai_speed_factor", self.ai_speed_factor),
            ("ball_diameter", self.ball_diameter),
            ("initial_ball_speed", self.difficulty.initial_ball_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.ball_diameter >= self.arena_radius {
            return Err(ConfigError::Invalid(format!(
                "ball_diameter {} does not fit in arena_radius {}",
                self.ball_diameter, self.arena_radius
            )));
        }
        let d = &self.difficulty;
        if !(d.speed_increment.is_finite() && d.speed_increment >= 0.0) {
            return Err(ConfigError::Invalid("speed_increment must be >= 0".into()));
        }
        if !(d.bounce_jitter.is_finite() && d.bounce_jitter >= 0.0) {
            return Err(ConfigError::Invalid("bounce_jitter must be >= 0".into()));
        }
        if !(d.max_ball_speed >= d.initial_ball_speed) {
            return Err(ConfigError::Invalid(format!(
                "max_ball_speed {} is below initial_ball_speed {}",
                d.max_ball_speed, d.initial_ball_speed
            )));
        }
        if self.prediction_steps == 0 || self.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid(
                "prediction_steps and tick_rate_hz must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Angular width of a paddle on this arena (radians)
    pub fn paddle_arc_width(&self) -> f64 {
        self.paddle_length / self.arena_radius
    }
}
