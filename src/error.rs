//! Error types
//!
//! The simulation itself has no I/O; these cover rejected lifecycle actions,
//! configuration loading, and invariant checks.

use std::fmt;

use crate::sim::GamePhase;

/// Lifecycle action requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Start,
    Advance,
    Restart,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Advance => write!(f, "advance"),
            Self::Restart => write!(f, "restart"),
        }
    }
}

/// A lifecycle action that is not a legal transition from the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub action: LifecycleAction,
    pub from: GamePhase,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} from {:?}", self.action, self.from)
    }
}

impl std::error::Error for TransitionError {}

/// Failure loading tuning or settings
#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// A run-state invariant that does not hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvariantViolation {
    FuelOutOfRange { fuel: f32, max: f32 },
    LevelZero,
    BankOutOfRange { bank: f32, limit: f32 },
    NegativeScroll { offset: f32, distance: f32 },
    InactiveEntityRetained { id: u32 },
    ParticleExpired,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FuelOutOfRange { fuel, max } => write!(f, "FUEL_RANGE: {fuel} not in [0, {max}]"),
            Self::LevelZero => write!(f, "LEVEL_NONZERO"),
            Self::BankOutOfRange { bank, limit } => {
                write!(f, "BANK_RANGE: {bank} not in [-{limit}, {limit}]")
            }
            Self::NegativeScroll { offset, distance } => {
                write!(f, "SCROLL_NONNEGATIVE: offset {offset}, distance {distance}")
            }
            Self::InactiveEntityRetained { id } => write!(f, "STORE_COMPACTED: entity {id}"),
            Self::ParticleExpired => write!(f, "PARTICLE_LIFE"),
        }
    }
}

impl std::error::Error for InvariantViolation {}
