//! Collision detection and response
//!
//! Everything in the world is an axis-aligned box, so detection is a plain
//! rectangle overlap test. The interesting part is response: each pair type
//! has its own effect on the economy and the run lifecycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{self, Palette};
use super::state::{AudioCue, EntityKind, GamePhase, RunState};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Inset every side by `margin`
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            size: self.size - Vec2::splat(2.0 * margin),
        }
    }

    /// Open-interval overlap: touching edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// What the resolver did this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_destroyed: u32,
    pub fuel_destroyed: u32,
    pub refuels: u32,
    pub player_destroyed: bool,
}

/// Resolve every interaction for the current step
pub fn resolve_collisions(state: &mut RunState) -> CollisionReport {
    let mut report = CollisionReport::default();

    resolve_player_shots(state, &mut report);

    if resolve_hostile_shots(state) {
        report.player_destroyed = true;
        return report;
    }

    resolve_player_contact(state, &mut report);
    report
}

/// Player shots against enemies, then the surviving shots against fuel pickups
fn resolve_player_shots(state: &mut RunState, report: &mut CollisionReport) {
    shoot_down(state, report, |kind| kind.is_enemy());
    shoot_down(state, report, |kind| kind == EntityKind::Fuel);
}

/// One pass of active player shots against objects matching `targets`
fn shoot_down(
    state: &mut RunState,
    report: &mut CollisionReport,
    targets: impl Fn(EntityKind) -> bool,
) {
    for si in 0..state.store.projectiles.len() {
        let shot = &state.store.projectiles[si];
        if !shot.active || shot.kind != EntityKind::PlayerShot {
            continue;
        }
        let shot_box = shot.bounds();

        // A shot stops at the first thing it hits
        let Some(oi) = state
            .store
            .objects
            .iter()
            .position(|o| o.active && targets(o.kind) && o.bounds().overlaps(&shot_box))
        else {
            continue;
        };

        state.store.projectiles[si].active = false;
        let target = &mut state.store.objects[oi];
        target.active = false;
        let (kind, center) = (target.kind, target.center());

        if kind == EntityKind::Fuel {
            state.economy.apply_penalty(state.tuning.fuel_penalty);
            effects::explosion(state, center, Palette::Penalty);
            report.fuel_destroyed += 1;
            log::debug!("Fuel pickup shot down, score {}", state.economy.score);
        } else {
            state.economy.add_score(state.tuning.enemy_reward);
            effects::explosion(state, center, Palette::Enemy);
            report.enemies_destroyed += 1;
            log::debug!("{:?} destroyed, score {}", kind, state.economy.score);
        }
    }
}

/// Hostile shots against the forgiving player hit-box; true if the player died
fn resolve_hostile_shots(state: &mut RunState) -> bool {
    let hitbox = state.player.hitbox(state.tuning.shot_forgiveness);
    let hit = state
        .store
        .projectiles
        .iter()
        .position(|p| p.active && p.kind == EntityKind::EnemyShot && p.bounds().overlaps(&hitbox));

    match hit {
        Some(si) => {
            state.store.projectiles[si].active = false;
            log::debug!("Player hit by hostile fire");
            destroy_player(state);
            true
        }
        None => false,
    }
}

/// Player flying into world objects
fn resolve_player_contact(state: &mut RunState, report: &mut CollisionReport) {
    let hitbox = state.player.hitbox(state.tuning.contact_forgiveness);

    for oi in 0..state.store.objects.len() {
        let obj = &state.store.objects[oi];
        if !obj.active || !obj.bounds().overlaps(&hitbox) {
            continue;
        }

        if obj.kind == EntityKind::Fuel {
            state.store.objects[oi].active = false;
            effects::cue(state, AudioCue::Refuel);
            let max_fuel = state.tuning.max_fuel;
            state.economy.refuel(state.tuning.refuel_amount, max_fuel);
            state.economy.add_score(state.tuning.refuel_bonus);
            report.refuels += 1;
            log::debug!("Refueled to {:.1}", state.economy.fuel);
        } else {
            log::debug!("Player collided with {:?}", obj.kind);
            destroy_player(state);
            report.player_destroyed = true;
            return;
        }
    }
}

fn destroy_player(state: &mut RunState) {
    let center = state.player.center();
    effects::explosion(state, center, Palette::PlayerDestroyed);
    if state.phase == GamePhase::Playing {
        state.end_run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, GameEvent};
    use crate::tuning::Tuning;

    /// A playing run with nothing in the world
    fn empty_run() -> RunState {
        let mut state = RunState::new(42, Tuning::default());
        state.start().unwrap();
        state.store.clear();
        state.events.clear();
        state
    }

    fn shot_at(state: &mut RunState, pos: Vec2) {
        state.store.spawn(Entity::new(EntityKind::PlayerShot, pos));
    }

    #[test]
    fn test_overlap_is_open_interval() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let inside = Aabb::new(Vec2::new(9.9, 9.9), Vec2::splat(10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_shrink_insets_all_sides() {
        let b = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(44.0, 56.0)).shrink(10.0);
        assert_eq!(b.min, Vec2::new(20.0, 30.0));
        assert_eq!(b.max(), Vec2::new(44.0, 66.0));
    }

    #[test]
    fn test_shot_destroys_enemy_for_exactly_one_reward() {
        let mut state = empty_run();
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShip, Vec2::new(100.0, 100.0)));
        // Two shots overlapping the same enemy: only the first scores
        shot_at(&mut state, Vec2::new(110.0, 110.0));
        shot_at(&mut state, Vec2::new(115.0, 110.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report.enemies_destroyed, 1);
        assert_eq!(state.economy.score, 100);
        assert!(!state.store.objects[0].active);
        assert!(!state.store.projectiles[0].active);
        assert!(state.store.projectiles[1].active);
        assert!(state.events.contains(&GameEvent::Audio(AudioCue::Explosion)));
    }

    #[test]
    fn test_shot_stops_at_first_target() {
        let mut state = empty_run();
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShip, Vec2::new(100.0, 100.0)));
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyTank, Vec2::new(100.0, 100.0)));
        shot_at(&mut state, Vec2::new(110.0, 110.0));

        resolve_collisions(&mut state);

        assert_eq!(state.economy.score, 100);
        assert!(!state.store.objects[0].active);
        assert!(state.store.objects[1].active);
    }

    #[test]
    fn test_enemy_takes_the_shot_over_overlapping_fuel() {
        let mut state = empty_run();
        state.economy.score = 500;
        // Fuel spawned first still loses to the enemy pass
        state
            .store
            .spawn(Entity::new(EntityKind::Fuel, Vec2::new(100.0, 100.0)));
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShip, Vec2::new(100.0, 100.0)));
        shot_at(&mut state, Vec2::new(110.0, 110.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report.enemies_destroyed, 1);
        assert_eq!(report.fuel_destroyed, 0);
        assert_eq!(state.economy.score, 600);
        assert!(state.store.objects[0].active);
        assert!(!state.store.objects[1].active);
    }

    #[test]
    fn test_simultaneous_hits_all_score() {
        let mut state = empty_run();
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShip, Vec2::new(60.0, 100.0)));
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyHeli, Vec2::new(250.0, 100.0)));
        shot_at(&mut state, Vec2::new(70.0, 110.0));
        shot_at(&mut state, Vec2::new(260.0, 110.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.enemies_destroyed, 2);
        assert_eq!(state.economy.score, 200);
    }

    #[test]
    fn test_shooting_fuel_is_penalised_and_floored() {
        let mut state = empty_run();
        state.economy.score = 30;
        state.economy.fuel = 120.0;
        state
            .store
            .spawn(Entity::new(EntityKind::Fuel, Vec2::new(100.0, 100.0)));
        shot_at(&mut state, Vec2::new(110.0, 110.0));

        let report = resolve_collisions(&mut state);

        assert_eq!(report.fuel_destroyed, 1);
        assert_eq!(state.economy.score, 0);
        // Fuel is untouched by shooting a pickup
        assert_eq!(state.economy.fuel, 120.0);
        assert_eq!(state.store.particles[0].color, Palette::Penalty.colors()[0]);
    }

    #[test]
    fn test_hostile_shot_ends_run_with_current_score() {
        let mut state = empty_run();
        state.economy.score = 700;
        let target = state.player.center();
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShot, target));

        let report = resolve_collisions(&mut state);

        assert!(report.player_destroyed);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            state
                .events
                .contains(&GameEvent::GameOver { score: 700, level: 1 })
        );
    }

    #[test]
    fn test_hostile_shot_grazing_the_margin_misses() {
        let mut state = empty_run();
        // Overlaps the raw hull but not the hit-box shrunk by 10
        let pos = state.player.pos + Vec2::new(-3.0, 20.0);
        state.store.spawn(Entity::new(EntityKind::EnemyShot, pos));

        let report = resolve_collisions(&mut state);
        assert!(!report.player_destroyed);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_flying_into_fuel_refuels() {
        let mut state = empty_run();
        state.economy.fuel = 250.0;
        let pos = state.player.pos;
        state.store.spawn(Entity::new(EntityKind::Fuel, pos));

        let report = resolve_collisions(&mut state);

        assert_eq!(report.refuels, 1);
        assert_eq!(state.economy.fuel, 290.0);
        assert_eq!(state.economy.score, 50);
        assert_eq!(state.events, vec![GameEvent::Audio(AudioCue::Refuel)]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_flying_into_enemy_is_fatal() {
        let mut state = empty_run();
        let pos = state.player.pos;
        state.store.spawn(Entity::new(EntityKind::EnemyTank, pos));
        // Pickup behind the enemy is never collected once the player is gone
        state.store.spawn(Entity::new(EntityKind::Fuel, pos));

        let report = resolve_collisions(&mut state);

        assert!(report.player_destroyed);
        assert_eq!(report.refuels, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.store.objects[1].active);
    }
}
