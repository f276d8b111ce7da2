//! River Strike headless entry point
//!
//! Flies the autopilot for a fixed number of frames and prints the final
//! snapshot as JSON. Useful for balance runs and replaying a seed.

use std::process::ExitCode;

use river_strike::autopilot;
use river_strike::config::RuntimeConfig;
use river_strike::consts::STEP_MS;
use river_strike::sim::GamePhase;
use river_strike::{Game, TransitionError};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("River Strike (headless) starting...");

    let config = RuntimeConfig::from_env();
    let tuning = match config.load_tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let settings = config.load_settings();

    let mut game = match config.seed {
        Some(seed) => Game::new(seed, tuning, &settings),
        None => Game::from_entropy(tuning, &settings),
    };
    game.on_game_over(|score, level| {
        log::info!("Game over: {} points, reached sector {}", score, level);
    });

    if let Err(e) = run(&mut game, config.frames) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    game.detach();

    let report = serde_json::json!({
        "seed": game.state().seed,
        "steps": game.steps(),
        "snapshot": game.snapshot(),
        "high_scores": game.high_scores(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Drive the game like a host would, one display frame at a time
fn run(game: &mut Game, frames: u64) -> Result<(), TransitionError> {
    game.start()?;
    for _ in 0..frames {
        match game.phase() {
            GamePhase::LevelComplete => game.advance()?,
            GamePhase::GameOver => game.restart()?,
            GamePhase::Idle => game.start()?,
            GamePhase::Playing => {}
        }
        game.set_commands(autopilot::steer(game.snapshot()));
        game.frame(STEP_MS);
    }
    Ok(())
}
