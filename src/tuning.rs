//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! rebalanced (or pinned down in tests) without touching the step pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::error::ConfigError;

/// Enemy variant weights for the spawn draw (ship, heli, tank)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantWeights {
    pub ship: u32,
    pub heli: u32,
    pub tank: u32,
}

impl Default for VariantWeights {
    fn default() -> Self {
        Self {
            ship: 40,
            heli: 40,
            tank: 20,
        }
    }
}

impl VariantWeights {
    pub fn total(&self) -> u32 {
        self.ship + self.heli + self.tank
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// World objects are purged once this far below the bottom edge
    pub object_margin: f32,
    /// Projectiles are purged once this far past either edge
    pub projectile_margin: f32,

    // === Economy ===
    pub max_fuel: f32,
    /// Fuel burned every step while playing
    pub fuel_drain: f32,
    pub refuel_amount: f32,
    pub refuel_bonus: u64,
    pub enemy_reward: u64,
    pub fuel_penalty: u64,
    /// Distance that must be flown to clear a level
    pub level_length: f32,

    // === Scroll ===
    pub base_scroll: f32,
    pub scroll_per_level: f32,
    pub forward_multiplier: f32,
    pub reverse_multiplier: f32,

    // === Player ===
    pub player_speed: f32,
    /// Vertical speed is `player_speed / vertical_divisor`
    pub vertical_divisor: f32,
    pub max_bank: f32,
    pub bank_step: f32,
    pub bank_decay: f32,
    /// Bank angles inside this band snap to level flight
    pub bank_deadzone: f32,

    // === Projectiles ===
    pub player_shot_speed: f32,
    pub enemy_shot_speed: f32,
    /// Simulated level time before enemies open fire
    pub hostile_fire_delay_ms: f64,
    /// Per-enemy, per-step chance to fire once hostile fire is enabled
    pub hostile_fire_chance: f64,

    // === Collision ===
    /// Player hit-box shrink against hostile shots
    pub shot_forgiveness: f32,
    /// Player hit-box shrink against direct contact
    pub contact_forgiveness: f32,

    // === Spawning ===
    pub base_spawn_interval: u32,
    pub spawn_interval_step: u32,
    pub min_spawn_interval: u32,
    pub enemy_chance: f64,
    pub fuel_chance: f64,
    pub variant_weights: VariantWeights,
    pub enemy_lane_margin: f32,
    pub fuel_lane_margin: f32,
    pub enemy_spawn_offset: f32,
    pub fuel_spawn_offset: f32,
    /// Rungs in the opening ladder (enemies at 1..rungs)
    pub ladder_rungs: u32,
    pub ladder_spacing: f32,
    /// Every n-th rung also carries a fuel pickup
    pub ladder_fuel_every: u32,

    // === Effects ===
    pub explosion_particles: usize,
    pub explosion_speed: f32,
    pub particle_decay: f32,
    pub max_particles: usize,
    pub engine_trail: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            object_margin: 50.0,
            projectile_margin: 20.0,

            max_fuel: 300.0,
            fuel_drain: 0.12,
            refuel_amount: 40.0,
            refuel_bonus: 50,
            enemy_reward: 100,
            fuel_penalty: 50,
            level_length: 4000.0,

            base_scroll: 3.0,
            scroll_per_level: 0.5,
            forward_multiplier: 1.5,
            reverse_multiplier: 0.5,

            player_speed: 6.0,
            vertical_divisor: 1.5,
            max_bank: 0.5,
            bank_step: 0.08,
            bank_decay: 0.06,
            bank_deadzone: 0.02,

            player_shot_speed: 12.0,
            enemy_shot_speed: 8.0,
            hostile_fire_delay_ms: 40_000.0,
            hostile_fire_chance: 0.015,

            shot_forgiveness: 10.0,
            contact_forgiveness: 5.0,

            base_spawn_interval: 120,
            spawn_interval_step: 10,
            min_spawn_interval: 60,
            enemy_chance: 0.7,
            fuel_chance: 0.25,
            variant_weights: VariantWeights::default(),
            enemy_lane_margin: 60.0,
            fuel_lane_margin: 100.0,
            enemy_spawn_offset: 50.0,
            fuel_spawn_offset: 100.0,
            ladder_rungs: 8,
            ladder_spacing: 150.0,
            ladder_fuel_every: 3,

            explosion_particles: 20,
            explosion_speed: 5.0,
            particle_decay: 0.03,
            max_particles: 512,
            engine_trail: true,
        }
    }
}

impl Tuning {
    /// Scroll speed for a level before the forward/reverse modulation
    pub fn base_scroll_for_level(&self, level: u32) -> f32 {
        self.base_scroll + level as f32 * self.scroll_per_level
    }

    /// Scroll distance between spawn ticks, denser on later levels
    pub fn spawn_interval_for_level(&self, level: u32) -> u32 {
        self.base_spawn_interval
            .saturating_sub(level.saturating_mul(self.spawn_interval_step))
            .max(self.min_spawn_interval)
            .max(1)
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp values that would break simulation invariants
    fn sanitized(mut self) -> Self {
        if self.max_fuel <= 0.0 {
            log::warn!("max_fuel must be positive, using default");
            self.max_fuel = Self::default().max_fuel;
        }
        self.fuel_drain = self.fuel_drain.max(0.0);
        self.max_bank = self.max_bank.abs();
        if self.vertical_divisor <= 0.0 {
            self.vertical_divisor = 1.0;
        }
        self.enemy_chance = self.enemy_chance.clamp(0.0, 1.0);
        self.fuel_chance = self.fuel_chance.clamp(0.0, 1.0);
        self.hostile_fire_chance = self.hostile_fire_chance.clamp(0.0, 1.0);
        if self.variant_weights.total() == 0 {
            log::warn!("variant weights sum to zero, using defaults");
            self.variant_weights = VariantWeights::default();
        }
        self.ladder_fuel_every = self.ladder_fuel_every.max(1);
        self
    }
}
