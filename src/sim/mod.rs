//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed step only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod economy;
pub mod effects;
pub mod input;
pub mod lifecycle;
pub mod motion;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{Aabb, CollisionReport, resolve_collisions};
pub use economy::FuelStatus;
pub use effects::Palette;
pub use input::{Action, CommandSet};
pub use snapshot::RenderSnapshot;
pub use state::{
    AudioCue, Economy, Entity, EntityKind, GameEvent, GamePhase, Particle, Player, RunState,
    ScrollState,
};
pub use store::{CompactBounds, EntityStore};
pub use tick::{StepOutcome, tick};
