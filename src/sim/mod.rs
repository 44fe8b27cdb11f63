//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one tick)
//! - Seeded RNG only, owned by the game state
//! - No rendering, input-device, or threading dependencies

pub mod ai;
pub mod arc;
pub mod ball;
pub mod collision;
pub mod mode;
pub mod paddle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ai::{AiController, AiTuning, predict_intercept};
pub use arc::ArcSegment;
pub use ball::Ball;
pub use collision::{clamp_inside, reflect_velocity, touches_boundary};
pub use mode::{Controller, GameMode, ModeDescriptor, ScoringRule, SeatSpec, Side};
pub use paddle::{Paddle, PaddleRole};
pub use snapshot::{BallView, PaddleView, Snapshot};
pub use state::{GameState, Scores, Seat};
pub use tick::{RoundEvent, TickInput, tick};
