//! Demo autopilot
//!
//! Steers from a [`RenderSnapshot`] alone, so it sees exactly what a player
//! sees. Used by the headless binary and attract mode.

use std::cmp::Ordering;

use crate::consts::FIELD_WIDTH;
use crate::sim::{CommandSet, Entity, EntityKind, GamePhase, RenderSnapshot};

/// How far ahead of the nose threats are considered
const LOOK_AHEAD: f32 = 260.0;
/// Extra clearance on each side of the hull when judging a lane
const LANE_MARGIN: f32 = 12.0;
/// Ignore horizontal error smaller than this to avoid jitter
const DEADBAND: f32 = 4.0;
/// Go looking for fuel below this fraction of the tank
const REFUEL_THRESHOLD: f32 = 0.7;

/// Choose commands for the next step
pub fn steer(snapshot: &RenderSnapshot) -> CommandSet {
    let mut commands = CommandSet::default();
    if snapshot.phase != GamePhase::Playing {
        return commands;
    }

    let player = &snapshot.player;
    let nose = player.pos.y;
    let px = player.center().x;
    let half_width = player.size.x / 2.0;

    let ahead = |e: &&Entity| {
        let gap = nose - (e.pos.y + e.size.y);
        gap > -player.size.y && gap < LOOK_AHEAD
    };
    let in_lane = |e: &Entity| {
        (e.center().x - px).abs() < e.size.x / 2.0 + half_width + LANE_MARGIN
    };

    // Nearest object directly ahead decides whether firing is safe
    let nearest_in_lane = snapshot
        .entities
        .iter()
        .filter(|e| !e.kind.is_projectile() && e.pos.y < nose && in_lane(e))
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));
    if let Some(target) = nearest_in_lane {
        commands.fire = target.kind.is_enemy();
    }

    // Dodge anything hostile closing on the hull
    let threat = snapshot
        .entities
        .iter()
        .filter(|e| e.kind.is_enemy() || e.kind == EntityKind::EnemyShot)
        .filter(ahead)
        .filter(|e| in_lane(e))
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));

    if let Some(threat) = threat {
        let dodge_right = if (threat.center().x - px).abs() < DEADBAND {
            // Dead ahead: break toward open water
            px < FIELD_WIDTH / 2.0
        } else {
            threat.center().x < px
        };
        commands.left = !dodge_right;
        commands.right = dodge_right;
        return commands;
    }

    // Otherwise head for the nearest fuel when running low
    if snapshot.economy.fuel < snapshot.max_fuel * REFUEL_THRESHOLD {
        let depot = snapshot
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Fuel && e.pos.y < nose)
            .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));
        if let Some(depot) = depot {
            let dx = depot.center().x - px;
            commands.left = dx < -DEADBAND;
            commands.right = dx > DEADBAND;
            // Never shoot the pickup we are chasing
            if in_lane(depot) {
                commands.fire = false;
            }
        }
    }

    commands
}
