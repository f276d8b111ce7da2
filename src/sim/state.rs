//! Game state and core simulation types
//!
//! Everything a run owns lives in [`RunState`]; the step pipeline borrows it
//! mutably and nothing else holds a reference between steps.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::store::EntityStore;
use crate::consts::*;
use crate::error::InvariantViolation;
use crate::tuning::Tuning;

/// Current phase of the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing in progress, waiting for a start action
    #[default]
    Idle,
    /// Active gameplay; the only phase in which stepping does anything
    Playing,
    /// Level distance flown, waiting for an advance action
    LevelComplete,
    /// Run ended
    GameOver,
}

/// Kinds of positioned, collidable world objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    EnemyShip,
    EnemyHeli,
    EnemyTank,
    Fuel,
    PlayerShot,
    EnemyShot,
}

impl EntityKind {
    /// Hostile craft that kill on contact and score when shot
    pub fn is_enemy(self) -> bool {
        matches!(self, Self::EnemyShip | Self::EnemyHeli | Self::EnemyTank)
    }

    pub fn is_projectile(self) -> bool {
        matches!(self, Self::PlayerShot | Self::EnemyShot)
    }

    /// Fixed hit-box for each kind
    pub fn size(self) -> Vec2 {
        match self {
            Self::Player => Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            Self::EnemyShip => Vec2::new(32.0, 40.0),
            Self::EnemyHeli => Vec2::new(32.0, 30.0),
            Self::EnemyTank => Vec2::new(32.0, 24.0),
            Self::Fuel => Vec2::new(30.0, 40.0),
            Self::PlayerShot => Vec2::new(PLAYER_SHOT_WIDTH, PLAYER_SHOT_HEIGHT),
            Self::EnemyShot => Vec2::splat(ENEMY_SHOT_SIZE),
        }
    }

    /// Base color (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            Self::Player => 0x94a3b8,
            Self::EnemyShip => 0x334155,
            Self::EnemyHeli => 0x14532d,
            Self::EnemyTank => 0x1e3a8a,
            Self::Fuel => 0xf472b6,
            Self::PlayerShot => 0xfbbf24,
            Self::EnemyShot => 0xef4444,
        }
    }
}

/// A world object or projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned by the store on spawn
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
    /// `false` marks the entity for removal at the end of the step
    pub active: bool,
    pub color: u32,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id: 0,
            pos,
            size: kind.size(),
            kind,
            active: true,
            color: kind.color(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The player's jet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Banking angle in radians, negative leaning left
    pub bank: f32,
    pub color: u32,
}

impl Player {
    fn at(pos: Vec2) -> Self {
        Self {
            pos,
            size: EntityKind::Player.size(),
            bank: 0.0,
            color: EntityKind::Player.color(),
        }
    }

    /// Pose at the start of a run
    pub fn run_start(tuning: &Tuning) -> Self {
        Self::at(Vec2::new(
            tuning.width / 2.0 - 20.0,
            tuning.height - 120.0,
        ))
    }

    /// Pose at the start of a later level
    pub fn level_start(tuning: &Tuning) -> Self {
        Self::at(Vec2::new(tuning.width / 2.0, tuning.height - 100.0))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Hit-box shrunk by a forgiveness margin on all four sides
    pub fn hitbox(&self, forgiveness: f32) -> Aabb {
        self.bounds().shrink(forgiveness)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub color: u32,
    pub size: f32,
}

/// Score, fuel, lives and level of the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub score: u64,
    pub fuel: f32,
    pub lives: u8,
    pub level: u32,
}

impl Economy {
    pub fn new_run(max_fuel: f32) -> Self {
        Self {
            score: 0,
            fuel: max_fuel,
            lives: START_LIVES,
            level: 1,
        }
    }
}

/// World scroll for the current level
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    /// Total scroll this level (wraps only visually)
    pub offset: f32,
    /// Distance flown toward the level-length threshold
    pub level_distance: f32,
    /// Scroll applied in the most recent step
    pub speed: f32,
}

/// Discrete audio cues raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    EngineStart,
    EngineStop,
    Shoot,
    Explosion,
    Refuel,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::EngineStart => "engine-start",
            AudioCue::EngineStop => "engine-stop",
            AudioCue::Shoot => "shoot",
            AudioCue::Explosion => "explosion",
            AudioCue::Refuel => "refuel",
        }
    }
}

/// Events produced by a step, drained by the host after it completes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Audio(AudioCue),
    LevelComplete { level: u32 },
    /// Raised exactly once per run
    GameOver { score: u64, level: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub tuning: Tuning,
    /// Seed of the current RNG stream
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub economy: Economy,
    pub scroll: ScrollState,
    pub player: Player,
    pub store: EntityStore,
    /// Steps simulated since the level started
    pub level_ticks: u64,
    /// Host wall-clock reading when the level started
    pub level_started_at_ms: f64,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl RunState {
    /// Create an idle run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::run_start(&tuning);
        let economy = Economy::new_run(tuning.max_fuel);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            economy,
            scroll: ScrollState::default(),
            player,
            store: EntityStore::default(),
            level_ticks: 0,
            level_started_at_ms: 0.0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Simulated time since the level started
    pub fn level_elapsed_ms(&self) -> f64 {
        self.level_ticks as f64 * STEP_MS
    }

    /// Whether enemies have started shooting this level
    pub fn hostile_fire_enabled(&self) -> bool {
        self.level_elapsed_ms() > self.tuning.hostile_fire_delay_ms
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check the invariants that must hold between steps
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let max = self.tuning.max_fuel;
        let fuel = self.economy.fuel;
        if !(0.0..=max).contains(&fuel) {
            return Err(InvariantViolation::FuelOutOfRange { fuel, max });
        }
        if self.economy.level == 0 {
            return Err(InvariantViolation::LevelZero);
        }
        let limit = self.tuning.max_bank;
        if self.player.bank.abs() > limit {
            return Err(InvariantViolation::BankOutOfRange {
                bank: self.player.bank,
                limit,
            });
        }
        if self.scroll.offset < 0.0 || self.scroll.level_distance < 0.0 {
            return Err(InvariantViolation::NegativeScroll {
                offset: self.scroll.offset,
                distance: self.scroll.level_distance,
            });
        }
        if let Some(e) = self
            .store
            .objects
            .iter()
            .chain(self.store.projectiles.iter())
            .find(|e| !e.active)
        {
            return Err(InvariantViolation::InactiveEntityRetained { id: e.id });
        }
        if self.store.particles.iter().any(|p| p.life <= 0.0) {
            return Err(InvariantViolation::ParticleExpired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_idle_and_full() {
        let state = RunState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.economy.level, 1);
        assert_eq!(state.economy.score, 0);
        assert_eq!(state.economy.fuel, 300.0);
        assert_eq!(state.economy.lives, 3);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_hostile_fire_gate_uses_simulated_time() {
        let mut state = RunState::new(7, Tuning::default());
        state.level_ticks = 2400; // exactly 40 s at 60 Hz
        assert!(!state.hostile_fire_enabled());
        state.level_ticks = 2401;
        assert!(state.hostile_fire_enabled());
    }

    #[test]
    fn test_level_clock_counts_driver_steps() {
        let mut state = RunState::new(7, Tuning::default());
        state.level_ticks = 90;
        assert_eq!(state.level_elapsed_ms(), 90.0 * STEP_MS);
    }

    #[test]
    fn test_invariant_check_catches_bad_fuel() {
        let mut state = RunState::new(7, Tuning::default());
        state.economy.fuel = -1.0;
        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::FuelOutOfRange { .. })
        ));
    }

    #[test]
    fn test_entity_kind_sizes() {
        assert_eq!(EntityKind::EnemyTank.size(), Vec2::new(32.0, 24.0));
        assert_eq!(EntityKind::Fuel.size(), Vec2::new(30.0, 40.0));
        assert!(EntityKind::EnemyHeli.is_enemy());
        assert!(!EntityKind::Fuel.is_enemy());
        assert!(EntityKind::EnemyShot.is_projectile());
    }
}
