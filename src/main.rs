//! Neon Breaker headless demo
//!
//! Runs an auto-playing session (the idle/demo paddle) without any
//! rendering, dispatching signals to a logging handler. Useful for watching
//! the simulation and for balance passes with a tuning file:
//!
//! ```text
//! RUST_LOG=info NEON_BREAKER_TUNING=tuning.json cargo run
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use neon_breaker::dispatch::{Dispatcher, LoggingHandler};
use neon_breaker::sim::{GamePhase, GameState, TickInput, tick};
use neon_breaker::tuning::Tuning;

/// Demo board dimensions; a real host feeds viewport sizes via `resize()`
const BOARD_WIDTH: f32 = 800.0;
const BOARD_HEIGHT: f32 = 600.0;

/// Safety stop for the demo loop (about 5 minutes at 60 fps)
const MAX_TICKS: u64 = 18_000;

fn load_tuning() -> Tuning {
    let Ok(path) = std::env::var("NEON_BREAKER_TUNING") else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(|json| {
        Tuning::from_json(&json).map_err(|e| e.to_string())
    }) {
        Ok(tuning) => {
            log::info!("loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            log::warn!("ignoring tuning file {path}: {e}");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("starting demo session with seed {seed}");

    let mut state = GameState::with_tuning(seed, BOARD_WIDTH, BOARD_HEIGHT, load_tuning());
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Box::new(LoggingHandler));

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    while state.time_ticks < MAX_TICKS {
        let signals = tick(&mut state, &input);
        dispatcher.dispatch(&signals);

        match state.phase {
            GamePhase::GameOver | GamePhase::Win => break,
            _ => {}
        }
    }

    let outcome = match state.phase {
        GamePhase::Win => "cleared the board",
        GamePhase::GameOver => "ran out of lives",
        _ => "hit the demo tick limit",
    };
    println!(
        "demo over after {} ticks: {} with score {} ({} bricks left)",
        state.time_ticks,
        outcome,
        state.score,
        state.alive_bricks()
    );
}
