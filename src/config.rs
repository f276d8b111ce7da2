//! Runtime configuration for the headless binary
//!
//! Runtime knobs only, read from the environment. Gameplay balance lives in
//! [`Tuning`] and player preferences in [`Settings`].

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::settings::Settings;
use crate::tuning::Tuning;

pub const SEED_VAR: &str = "RIVER_SEED";
pub const FRAMES_VAR: &str = "RIVER_FRAMES";
pub const TUNING_VAR: &str = "RIVER_TUNING";
pub const SETTINGS_VAR: &str = "RIVER_SETTINGS";

/// Default demo length, one minute at 60 Hz
pub const DEFAULT_FRAMES: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeConfig {
    /// Fixed seed; `None` draws one from entropy
    pub seed: Option<u64>,
    pub frames: u64,
    pub tuning_path: Option<PathBuf>,
    pub settings_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR).and_then(|v| v.trim().parse().ok());
        let frames = lookup(FRAMES_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_FRAMES);
        let path = |key| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };
        Self {
            seed,
            frames,
            tuning_path: path(TUNING_VAR),
            settings_path: path(SETTINGS_VAR),
        }
    }

    /// Tuning from the configured file, or defaults when none is set
    pub fn load_tuning(&self) -> Result<Tuning, ConfigError> {
        match &self.tuning_path {
            Some(path) => Tuning::load(path),
            None => Ok(Tuning::default()),
        }
    }

    /// Settings never fail a launch; a bad file logs and falls back
    pub fn load_settings(&self) -> Settings {
        match &self.settings_path {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        }
    }
}
