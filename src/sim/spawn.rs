//! Procedural spawning of enemies, fuel pickups and hostile fire
//!
//! All randomness is drawn from the run's seeded RNG so a given seed and
//! input sequence always produces the same world.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, RunState};
use crate::tuning::VariantWeights;

/// Weighted draw across the three enemy variants
pub fn choose_variant(rng: &mut impl Rng, weights: &VariantWeights) -> EntityKind {
    let total = weights.total();
    if total == 0 {
        return EntityKind::EnemyShip;
    }
    let roll = rng.random_range(0..total);
    if roll < weights.ship {
        EntityKind::EnemyShip
    } else if roll < weights.ship + weights.heli {
        EntityKind::EnemyHeli
    } else {
        EntityKind::EnemyTank
    }
}

/// Uniform x between the lane margins
fn lane_x(rng: &mut impl Rng, field_width: f32, margin: f32) -> f32 {
    let span = (field_width - 2.0 * margin).max(0.0);
    margin + rng.random::<f32>() * span
}

/// Spawn a random enemy `y_offset` above the top edge
pub fn spawn_enemy(state: &mut RunState, y_offset: f32) -> u32 {
    let kind = choose_variant(&mut state.rng, &state.tuning.variant_weights);
    let x = lane_x(
        &mut state.rng,
        state.tuning.width,
        state.tuning.enemy_lane_margin,
    );
    log::trace!("Spawning {:?} at x={:.1}", kind, x);
    state.store.spawn(Entity::new(kind, Vec2::new(x, -y_offset)))
}

/// Spawn a fuel pickup `y_offset` above the top edge
pub fn spawn_fuel(state: &mut RunState, y_offset: f32) -> u32 {
    let x = lane_x(
        &mut state.rng,
        state.tuning.width,
        state.tuning.fuel_lane_margin,
    );
    log::trace!("Spawning fuel at x={:.1}", x);
    state
        .store
        .spawn(Entity::new(EntityKind::Fuel, Vec2::new(x, -y_offset)))
}

/// Populate the stretch ahead of the player at fixed offsets
pub fn seed_opening_ladder(state: &mut RunState) {
    let spacing = state.tuning.ladder_spacing;
    let fuel_every = state.tuning.ladder_fuel_every.max(1);
    for rung in 1..state.tuning.ladder_rungs {
        let offset = rung as f32 * spacing;
        spawn_enemy(state, offset);
        if rung % fuel_every == 0 {
            spawn_fuel(state, offset + spacing / 2.0);
        }
    }
}

/// Whether a spawn tick boundary was crossed by this step's scroll
pub fn crossed_spawn_tick(offset: f32, delta: f32, interval: u32) -> bool {
    let phase = (offset.max(0.0).floor() as u64) % u64::from(interval.max(1));
    (phase as f32) < delta
}

/// Possibly introduce new entities above the visible area
pub fn run_spawn_director(state: &mut RunState, scroll_delta: f32) {
    let interval = state.tuning.spawn_interval_for_level(state.economy.level);
    if !crossed_spawn_tick(state.scroll.offset, scroll_delta, interval) {
        return;
    }

    let (enemy_offset, fuel_offset) = (
        state.tuning.enemy_spawn_offset,
        state.tuning.fuel_spawn_offset,
    );
    if state.rng.random::<f64>() < state.tuning.enemy_chance {
        let id = spawn_enemy(state, enemy_offset);
        log::debug!("Spawn tick at {:.0}: enemy #{}", state.scroll.offset, id);
    }
    if state.rng.random::<f64>() < state.tuning.fuel_chance {
        let id = spawn_fuel(state, fuel_offset);
        log::debug!("Spawn tick at {:.0}: fuel #{}", state.scroll.offset, id);
    }
}

/// On-screen enemies occasionally fire downward once the gate has opened
pub fn run_hostile_fire(state: &mut RunState) {
    if !state.hostile_fire_enabled() {
        return;
    }
    let height = state.tuning.height;
    let chance = state.tuning.hostile_fire_chance;

    let mut muzzles = Vec::new();
    for obj in &state.store.objects {
        let on_screen = obj.pos.y > 0.0 && obj.pos.y < height;
        if obj.active && obj.kind.is_enemy() && on_screen && state.rng.random::<f64>() < chance {
            muzzles.push(obj.pos + Vec2::new(obj.size.x / 2.0 - 2.0, obj.size.y));
        }
    }
    for muzzle in muzzles {
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShot, muzzle));
    }
}
