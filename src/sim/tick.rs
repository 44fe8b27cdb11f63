//! Fixed timestep simulation tick
//!
//! One call advances the round by one tick: paddles move, the ball moves,
//! and a boundary contact resolves into a bounce or a miss.

use serde::{Deserialize, Serialize};

use super::collision::touches_boundary;
use super::mode::{ScoringRule, Side};
use super::state::GameState;

/// Held paddle intents for a single tick
///
/// "Up" turns the paddle counter-clockwise (+θ), "down" clockwise. Intents
/// for a seat that is not human-controlled in the active mode are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

/// What happened at the rim this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A paddle on `side` returned the ball at `angle`
    Hit { side: Side, angle: f64 },
    /// The ball crossed the rim at `angle`; `side` is the half it left through
    Miss { side: Side, angle: f64 },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<RoundEvent> {
    if state.paused {
        return None;
    }
    state.time_ticks += 1;

    apply_input(state, input);
    update_ai(state);

    state.ball.update();

    if !touches_boundary(state.ball.pos, state.ball.diameter, state.config.arena_radius) {
        return None;
    }
    Some(resolve_contact(state))
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let intents = [
        (Side::Left, input.left_up, input.left_down),
        (Side::Right, input.right_up, input.right_down),
    ];
    for (side, up, down) in intents {
        let Some(seat) = state.seat_mut(side) else {
            continue;
        };
        if !seat.is_human() {
            continue;
        }
        if up {
            seat.paddle.move_step(1);
        }
        if down {
            seat.paddle.move_step(-1);
        }
    }
}

fn update_ai(state: &mut GameState) {
    let arena_radius = state.config.arena_radius;
    let GameState {
        left,
        right,
        ball,
        rng,
        ..
    } = state;

    for seat in left.iter_mut().chain(right.iter_mut()) {
        if let Some(ai) = seat.ai.as_mut() {
            ai.step(&mut seat.paddle, ball, arena_radius, rng);
        }
    }
}

/// Which seat defends the point where the ball touched the rim
fn owning_side(state: &GameState) -> Side {
    if state.descriptor.seat_count() == 1 {
        return if state.right.is_some() { Side::Right } else { Side::Left };
    }
    if state.ball.pos.x < 0.0 { Side::Left } else { Side::Right }
}

fn resolve_contact(state: &mut GameState) -> RoundEvent {
    let angle = state.ball.angle_from_center();
    let side = owning_side(state);

    let paddle_angle = state
        .seat(side)
        .map(|seat| &seat.paddle)
        .filter(|paddle| paddle.is_within_arc(angle))
        .map(|paddle| paddle.theta);

    match paddle_angle {
        Some(paddle_angle) => {
            state.ball.handle_paddle_collision(
                paddle_angle,
                state.config.arena_radius,
                &state.difficulty,
                &mut state.rng,
            );
            state.scores.credit(side);
            log::debug!(
                "{:?} paddle hit at {:.3} rad, score {}, speed {:.2}",
                side,
                angle,
                state.scores.get(side),
                state.ball.speed
            );
            RoundEvent::Hit { side, angle }
        }
        None => {
            match state.descriptor.scoring {
                ScoringRule::SoloRally => state.scores.reset_side(side),
                ScoringRule::SideRally => state.scores.clear(),
            }
            log::debug!("Miss on {:?} side at {:.3} rad", side, angle);
            state.serve();
            RoundEvent::Miss { side, angle }
        }
    }
}
