//! Read-only view of a run for the presentation layer
//!
//! Built once at the end of each step so a renderer never observes a
//! half-updated world.

use serde::{Deserialize, Serialize};

use super::state::{Economy, Entity, GamePhase, Particle, Player, RunState};

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub economy: Economy,
    pub max_fuel: f32,
    pub scroll_offset: f32,
    pub level_distance: f32,
    pub level_length: f32,
    pub player: Player,
    /// Active enemies, pickups and projectiles in store order
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
}

impl RenderSnapshot {
    pub fn capture(state: &RunState) -> Self {
        let mut entities = Vec::with_capacity(state.store.active_count());
        state.store.for_each_active(|e| entities.push(e.clone()));
        Self {
            phase: state.phase,
            economy: state.economy.clone(),
            max_fuel: state.tuning.max_fuel,
            scroll_offset: state.scroll.offset,
            level_distance: state.scroll.level_distance,
            level_length: state.tuning.level_length,
            player: state.player.clone(),
            entities,
            particles: state
                .store
                .particles
                .iter()
                .filter(|p| p.life > 0.0)
                .cloned()
                .collect(),
        }
    }

    /// Fraction of the level flown, 0-1
    pub fn level_progress(&self) -> f32 {
        if self.level_length <= 0.0 {
            return 1.0;
        }
        (self.level_distance / self.level_length).clamp(0.0, 1.0)
    }

    /// HUD warning threshold (a quarter tank)
    pub fn fuel_low(&self) -> bool {
        self.economy.fuel < self.max_fuel * 0.25
    }
}
