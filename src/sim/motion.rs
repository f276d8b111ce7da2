//! Player control, world scroll, and kinematics
//!
//! Positions advance by fixed per-step amounts; there is no dt scaling
//! because the simulation only ever runs at its fixed step.

use glam::Vec2;

use super::effects;
use super::input::CommandSet;
use super::state::{AudioCue, Entity, EntityKind, RunState};
use crate::approach;
use crate::consts::{PLAYER_BOTTOM_INSET, PLAYER_EDGE_INSET};
use crate::tuning::Tuning;

/// Scroll speed for this step given the level and held commands
pub fn scroll_speed(tuning: &Tuning, level: u32, commands: &CommandSet) -> f32 {
    let base = tuning.base_scroll_for_level(level);
    if commands.up {
        base * tuning.forward_multiplier
    } else if commands.down {
        base * tuning.reverse_multiplier
    } else {
        base
    }
}

/// Apply lateral/vertical commands, ease the bank angle, and clamp
pub fn integrate_player(state: &mut RunState, commands: &CommandSet) {
    let t = &state.tuning;
    let player = &mut state.player;
    let mut moved_x = false;

    if commands.left {
        player.pos.x -= t.player_speed;
        player.bank = approach(player.bank, -t.max_bank, t.bank_step);
        moved_x = true;
    }
    if commands.right {
        player.pos.x += t.player_speed;
        player.bank = approach(player.bank, t.max_bank, t.bank_step);
        moved_x = true;
    }

    // Return to level flight
    if !moved_x {
        if player.bank.abs() > t.bank_deadzone {
            player.bank = approach(player.bank, 0.0, t.bank_decay);
        } else {
            player.bank = 0.0;
        }
    }

    let vertical = t.player_speed / t.vertical_divisor;
    if commands.up {
        player.pos.y -= vertical;
    }
    if commands.down {
        player.pos.y += vertical;
    }

    // Hitting a wall forces level wings
    let max_x = t.width - PLAYER_EDGE_INSET - player.size.x;
    if player.pos.x < PLAYER_EDGE_INSET {
        player.pos.x = PLAYER_EDGE_INSET;
        player.bank = 0.0;
    }
    if player.pos.x > max_x {
        player.pos.x = max_x;
        player.bank = 0.0;
    }
    player.pos.y = player
        .pos
        .y
        .clamp(PLAYER_EDGE_INSET, t.height - PLAYER_BOTTOM_INSET);
}

/// Launch twin shots from the wingtips
pub fn fire(state: &mut RunState) {
    let player = &state.player;
    let left = player.pos + Vec2::new(-4.0, 15.0);
    let right = player.pos + Vec2::new(player.size.x, 15.0);
    state
        .store
        .spawn(Entity::new(EntityKind::PlayerShot, left));
    state
        .store
        .spawn(Entity::new(EntityKind::PlayerShot, right));
    effects::cue(state, AudioCue::Shoot);
}

/// Advance scroll offset and level distance; returns this step's delta
pub fn advance_scroll(state: &mut RunState, commands: &CommandSet) -> f32 {
    let speed = scroll_speed(&state.tuning, state.economy.level, commands);
    state.scroll.speed = speed;
    state.scroll.offset += speed;
    state.scroll.level_distance += speed;
    speed
}

/// Move world objects with the scroll, projectiles by their own speed,
/// and particles by their velocity
pub fn move_world(state: &mut RunState, scroll_delta: f32) {
    for obj in &mut state.store.objects {
        obj.pos.y += scroll_delta;
    }

    let (up, down) = (state.tuning.player_shot_speed, state.tuning.enemy_shot_speed);
    for shot in &mut state.store.projectiles {
        match shot.kind {
            EntityKind::EnemyShot => shot.pos.y += down,
            _ => shot.pos.y -= up,
        }
    }

    let decay = state.tuning.particle_decay;
    for p in &mut state.store.particles {
        p.pos += p.vel;
        p.life -= decay;
    }
}
