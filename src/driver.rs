//! Fixed-rate tick driver
//!
//! Runs the simulation on its own thread. Input arrives asynchronously from
//! whatever owns the window: held paddle intents are written into a mutex,
//! pause and run flags are atomics, and discrete commands go over a channel
//! that the driver drains at the start of every tick. After each tick the
//! driver publishes a [`Snapshot`] and calls the frame callback, which is the
//! presentation layer's redraw hook.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::*;
use crate::sim::{GameMode, GameState, RoundEvent, Snapshot, TickInput, tick};

/// Discrete input events forwarded by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectMode(GameMode),
    Reset,
    TogglePause,
    TogglePrediction,
    AdjustAiResponsiveness(f64),
    AdjustAiAccuracy(f64),
    AdjustMaxBallSpeed(f64),
    AdjustSpeedIncrement(f64),
}

impl Command {
    /// Default key layout: space, r, 1-4, -/=, [/], ,/., h
    pub fn from_key(key: char) -> Vec<Command> {
        match key {
            ' ' => vec![Command::TogglePause],
            'r' | 'R' => vec![Command::Reset],
            '1'..='4' => key
                .to_digit(10)
                .and_then(|id| GameMode::from_id(id as u8))
                .map(Command::SelectMode)
                .into_iter()
                .collect(),
            '-' => vec![
                Command::AdjustAiResponsiveness(-RESPONSIVENESS_STEP),
                Command::AdjustAiAccuracy(-ACCURACY_STEP),
            ],
            '=' | '+' => vec![
                Command::AdjustAiResponsiveness(RESPONSIVENESS_STEP),
                Command::AdjustAiAccuracy(ACCURACY_STEP),
            ],
            '[' => vec![Command::AdjustMaxBallSpeed(-MAX_SPEED_STEP)],
            ']' => vec![Command::AdjustMaxBallSpeed(MAX_SPEED_STEP)],
            ',' => vec![Command::AdjustSpeedIncrement(-SPEED_INCREMENT_STEP)],
            '.' => vec![Command::AdjustSpeedIncrement(SPEED_INCREMENT_STEP)],
            'h' | 'H' => vec![Command::TogglePrediction],
            _ => Vec::new(),
        }
    }

    /// Apply directly to a game state (no driver involved)
    pub fn apply(self, state: &mut GameState) {
        match self {
            Command::SelectMode(mode) => state.select_mode(mode),
            Command::Reset => state.reset(),
            Command::TogglePause => state.toggle_pause(),
            Command::TogglePrediction => state.toggle_prediction(),
            Command::AdjustAiResponsiveness(delta) => state.adjust_ai_responsiveness(delta),
            Command::AdjustAiAccuracy(delta) => state.adjust_ai_accuracy(delta),
            Command::AdjustMaxBallSpeed(delta) => state.adjust_max_ball_speed(delta),
            Command::AdjustSpeedIncrement(delta) => state.adjust_speed_increment(delta),
        }
    }
}

/// Flags and held input shared between the input side and the tick thread
#[derive(Debug, Default)]
struct Controls {
    running: AtomicBool,
    paused: AtomicBool,
    input: Mutex<TickInput>,
}

/// Sleep for whatever is left of `period` since `frame_start`
///
/// An overrun tick sleeps zero and the next one starts immediately; there
/// is no catch-up.
pub fn limit_frame_rate(frame_start: Instant, period: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < period {
        thread::sleep(period - elapsed);
    }
}

/// Owns a game state until it is spawned onto its own thread
pub struct TickDriver {
    state: GameState,
    period: Duration,
}

impl TickDriver {
    pub fn new(state: GameState) -> Self {
        let hz = state.config.tick_rate_hz.max(1);
        Self {
            state,
            period: Duration::from_secs(1) / hz,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking with no frame callback
    pub fn spawn(self) -> std::io::Result<DriverHandle> {
        self.spawn_with(|_, _| {})
    }

    /// Start ticking; `on_frame` runs on the tick thread after every tick
    pub fn spawn_with<F>(self, mut on_frame: F) -> std::io::Result<DriverHandle>
    where
        F: FnMut(&Snapshot, Option<RoundEvent>) + Send + 'static,
    {
        let controls = Arc::new(Controls::default());
        controls.running.store(true, Ordering::Release);
        controls.paused.store(self.state.paused, Ordering::Release);

        let published = Arc::new(RwLock::new(Snapshot::capture(&self.state)));
        let (commands, receiver) = mpsc::channel();

        let thread = {
            let controls = Arc::clone(&controls);
            let published = Arc::clone(&published);
            let TickDriver { state, period } = self;
            thread::Builder::new()
                .name("tick-driver".into())
                .spawn(move || run(state, period, &controls, &receiver, &published, &mut on_frame))?
        };

        Ok(DriverHandle {
            controls,
            commands,
            published,
            thread: Some(thread),
        })
    }
}

fn run<F>(
    mut state: GameState,
    period: Duration,
    controls: &Controls,
    commands: &Receiver<Command>,
    published: &RwLock<Snapshot>,
    on_frame: &mut F,
) -> GameState
where
    F: FnMut(&Snapshot, Option<RoundEvent>),
{
    log::info!(
        "Tick driver started ({} mode, {:?} per tick)",
        state.descriptor.name,
        period
    );

    while controls.running.load(Ordering::Acquire) {
        let frame_start = Instant::now();

        for command in commands.try_iter() {
            apply_command(&mut state, controls, command);
        }
        state.set_paused(controls.paused.load(Ordering::Acquire));

        let input = *controls.input.lock().unwrap_or_else(PoisonError::into_inner);
        let event = tick(&mut state, &input);

        let snapshot = Snapshot::capture(&state);
        on_frame(&snapshot, event);
        *published.write().unwrap_or_else(PoisonError::into_inner) = snapshot;

        limit_frame_rate(frame_start, period);
    }

    log::info!("Tick driver stopped after {} ticks", state.time_ticks);
    state
}

fn apply_command(state: &mut GameState, controls: &Controls, command: Command) {
    match command {
        Command::TogglePause => {
            controls.paused.fetch_xor(true, Ordering::AcqRel);
        }
        Command::Reset | Command::SelectMode(_) => {
            command.apply(state);
            controls.paused.store(false, Ordering::Release);
        }
        other => other.apply(state),
    }
}

/// Input-side handle to a running tick driver
pub struct DriverHandle {
    controls: Arc<Controls>,
    commands: Sender<Command>,
    published: Arc<RwLock<Snapshot>>,
    thread: Option<JoinHandle<GameState>>,
}

impl DriverHandle {
    /// Queue a command for the next tick. Returns false once the driver has exited.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Replace the held paddle intents
    pub fn set_input(&self, input: TickInput) {
        *self.controls.input.lock().unwrap_or_else(PoisonError::into_inner) = input;
    }

    pub fn toggle_pause(&self) {
        self.controls.paused.fetch_xor(true, Ordering::AcqRel);
    }

    pub fn is_paused(&self) -> bool {
        self.controls.paused.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.controls.running.load(Ordering::Acquire)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop after the current tick and hand back the final state
    pub fn stop(mut self) -> Option<GameState> {
        self.controls.running.store(false, Ordering::Release);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(state) => Some(state),
            Err(_) => {
                log::error!("Tick driver thread panicked");
                None
            }
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.controls.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
