//! Circle Pong headless runner
//!
//! Runs a session on the tick driver without a window and logs what the
//! presentation layer would see.
//!
//! Usage: `circle-pong [config.json] [mode 1-4] [seconds]`

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use circle_pong::sim::{GameMode, GameState, RoundEvent, Side};
use circle_pong::{Command, SimConfig, TickDriver};

const DEFAULT_RUN_SECONDS: u64 = 5;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Circle Pong (headless) starting...");

    let mut args = std::env::args().skip(1);

    let config = match args.next().map(PathBuf::from) {
        Some(path) => SimConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    let mode = match args.next() {
        Some(raw) => {
            let id: u8 = raw.parse().with_context(|| format!("invalid mode '{raw}'"))?;
            match GameMode::from_id(id) {
                Some(mode) => mode,
                None => bail!("mode must be 1-4, got {id}"),
            }
        }
        None => GameMode::TwoAi,
    };

    let seconds = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid run length '{raw}'"))?,
        None => DEFAULT_RUN_SECONDS,
    };

    let seed = config.seed.unwrap_or_else(clock_seed);
    log::info!("Starting {} with seed {}", mode.descriptor().name, seed);

    let state = GameState::new(config, mode, seed);
    let handle = TickDriver::new(state)
        .spawn_with(|snapshot, event| match event {
            Some(RoundEvent::Miss { side, angle }) => log::info!(
                "Tick {}: miss on {:?} side at {:.2} rad",
                snapshot.tick,
                side,
                angle
            ),
            Some(RoundEvent::Hit { side, .. }) => log::trace!(
                "Tick {}: {:?} return, ball speed {:.2}",
                snapshot.tick,
                side,
                snapshot.ball.speed
            ),
            None => {}
        })
        .context("spawning tick driver")?;

    // Show the ghost ball halfway through, the way a viewer would toggle it
    std::thread::sleep(Duration::from_secs(seconds) / 2);
    handle.send(Command::TogglePrediction);
    std::thread::sleep(Duration::from_secs(seconds) / 2);

    let snapshot = handle.snapshot();
    log::info!("Final snapshot: {}", serde_json::to_string(&snapshot)?);

    let Some(state) = handle.stop() else {
        bail!("tick driver exited abnormally");
    };
    for side in [Side::Left, Side::Right] {
        if let Some(label) = snapshot.score_label(side) {
            println!("{label}: {}", state.scores.get(side));
        }
    }
    println!("{} ticks simulated", state.time_ticks);

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
