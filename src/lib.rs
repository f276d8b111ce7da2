//! River Strike - A vertically scrolling river combat arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (scroll, motion, spawning, collisions, economy)
//! - `driver`: Host-facing frame loop that feeds input and drains events
//! - `audio`: Audio cue sinks
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `config`: Runtime configuration from the environment

pub mod audio;
pub mod autopilot;
pub mod config;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::Game;
pub use error::{ConfigError, InvariantViolation, TransitionError};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Simulation steps per second (one step per display refresh)
    pub const STEP_HZ: f64 = 60.0;
    /// Fixed simulation step in milliseconds
    pub const STEP_MS: f64 = 1000.0 / STEP_HZ;
    /// Maximum steps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player hull
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 56.0;
    /// Inset of the playable rectangle from the canvas edges
    pub const PLAYER_EDGE_INSET: f32 = 30.0;
    /// Player may dip this far above the bottom edge
    pub const PLAYER_BOTTOM_INSET: f32 = 50.0;

    /// Projectile hulls
    pub const PLAYER_SHOT_WIDTH: f32 = 4.0;
    pub const PLAYER_SHOT_HEIGHT: f32 = 15.0;
    pub const ENEMY_SHOT_SIZE: f32 = 6.0;

    /// Starting lives for a run
    pub const START_LIVES: u8 = 3;
}

/// Move `value` toward `target` by at most `step`
#[inline]
pub fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}
