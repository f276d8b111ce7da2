//! Fixed-step simulation tick
//!
//! Core game loop that advances a run by exactly one step.

use super::collision::{CollisionReport, resolve_collisions};
use super::economy::FuelStatus;
use super::effects::{self, Palette};
use super::input::CommandSet;
use super::motion;
use super::spawn;
use super::state::{GamePhase, RunState};
use super::store::CompactBounds;

/// Summary of one step, mostly for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    /// False when the phase gate skipped the step
    pub simulated: bool,
    pub scroll_delta: f32,
    pub collisions: CollisionReport,
}

/// Advance the run by one step using a snapshot of the held commands
pub fn tick(state: &mut RunState, input: &CommandSet) -> StepOutcome {
    // Only Playing simulates; every other phase waits for a host action
    if state.phase != GamePhase::Playing {
        return StepOutcome::default();
    }
    let commands = *input;
    let mut outcome = StepOutcome {
        simulated: true,
        ..Default::default()
    };

    state.level_ticks += 1;

    motion::integrate_player(state, &commands);
    if commands.fire {
        motion::fire(state);
    }
    if state.tuning.engine_trail {
        effects::engine_trail(state);
    }

    // Running dry ends the run before anything else happens this step
    if state.economy.drain(state.tuning.fuel_drain) == FuelStatus::Exhausted {
        let center = state.player.center();
        effects::explosion(state, center, Palette::PlayerDestroyed);
        log::info!("Out of fuel");
        state.end_run();
        finish_step(state);
        return outcome;
    }

    outcome.scroll_delta = motion::advance_scroll(state, &commands);
    if state.scroll.level_distance > state.tuning.level_length {
        state.complete_level();
        finish_step(state);
        return outcome;
    }

    spawn::run_spawn_director(state, outcome.scroll_delta);
    motion::move_world(state, outcome.scroll_delta);
    spawn::run_hostile_fire(state);

    outcome.collisions = resolve_collisions(state);
    finish_step(state);
    outcome
}

/// Purge dead entries once per step, after collision resolution
fn finish_step(state: &mut RunState) {
    state.store.compact(CompactBounds {
        height: state.tuning.height,
        object_margin: state.tuning.object_margin,
        projectile_margin: state.tuning.projectile_margin,
    });
    debug_assert_eq!(state.check_invariants(), Ok(()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{AudioCue, Entity, EntityKind, GameEvent};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Tuning with no random spawns and no hostile fire
    fn quiet_tuning() -> Tuning {
        Tuning {
            enemy_chance: 0.0,
            fuel_chance: 0.0,
            hostile_fire_chance: 0.0,
            ..Default::default()
        }
    }

    fn quiet_run() -> RunState {
        let mut state = RunState::new(2024, quiet_tuning());
        state.start().unwrap();
        state.store.clear();
        state.drain_events();
        state
    }

    #[test]
    fn test_idle_step_is_noop() {
        let mut state = RunState::new(1, Tuning::default());
        let before = state.economy.clone();
        let outcome = tick(&mut state, &CommandSet::default());
        assert!(!outcome.simulated);
        assert_eq!(state.economy, before);
        assert_eq!(state.level_ticks, 0);
    }

    #[test]
    fn test_step_drains_fuel_and_scrolls() {
        let mut state = quiet_run();
        let outcome = tick(&mut state, &CommandSet::default());
        assert!(outcome.simulated);
        assert_eq!(outcome.scroll_delta, 3.5);
        assert_eq!(state.scroll.level_distance, 3.5);
        assert!((state.economy.fuel - 299.88).abs() < 1e-4);
    }

    #[test]
    fn test_level_completes_on_distance_before_fuel_runs_out() {
        let mut state = quiet_run();
        let idle = CommandSet::default();

        let mut completed_at = None;
        for step in 1..=2500 {
            tick(&mut state, &idle);
            if state.phase != GamePhase::Playing {
                completed_at = Some(step);
                break;
            }
        }

        // 1142 * 3.5 = 3997 is short of 4000; 1143 * 3.5 = 4000.5 crosses it
        assert_eq!(completed_at, Some(1143));
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.scroll.level_distance > 4000.0);
        assert!((state.economy.fuel - (300.0 - 1143.0 * 0.12)).abs() < 0.05);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelComplete { level: 1 })
        );

        // LevelComplete is a pause: stepping does nothing
        let fuel = state.economy.fuel;
        tick(&mut state, &idle);
        assert_eq!(state.economy.fuel, fuel);
    }

    #[test]
    fn test_forward_flight_completes_level_sooner() {
        let mut state = quiet_run();
        let forward = CommandSet {
            up: true,
            ..Default::default()
        };
        let mut steps = 0;
        while state.phase == GamePhase::Playing {
            tick(&mut state, &forward);
            steps += 1;
        }
        // 4000 / 5.25 = 761.9
        assert_eq!(steps, 762);
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_fuel_exhaustion_preempts_collisions() {
        let mut state = quiet_run();
        state.economy.fuel = 0.1;
        state.economy.score = 10;
        // A pickup right on the player would otherwise refuel and score
        let pos = state.player.pos;
        state.store.spawn(Entity::new(EntityKind::Fuel, pos));

        tick(&mut state, &CommandSet::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.economy.fuel, 0.0);
        assert_eq!(state.economy.score, 10);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 10, level: 1 }));
        assert!(!events.contains(&GameEvent::Audio(AudioCue::Refuel)));
        assert!(events.contains(&GameEvent::Audio(AudioCue::EngineStop)));
    }

    #[test]
    fn test_game_over_step_is_noop() {
        let mut state = quiet_run();
        state.economy.fuel = 0.05;
        tick(&mut state, &CommandSet::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        state.drain_events();

        let outcome = tick(&mut state, &CommandSet::default());
        assert!(!outcome.simulated);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_fire_then_hit_enemy_over_steps() {
        let mut state = quiet_run();
        let nose = state.player.pos;
        // Enemy straight above the left wingtip; shots close in at 12 + 3.5 per step
        state.store.spawn(Entity::new(
            EntityKind::EnemyTank,
            Vec2::new(nose.x - 18.0, nose.y - 200.0),
        ));

        tick(
            &mut state,
            &CommandSet {
                fire: true,
                ..Default::default()
            },
        );
        assert!(state.drain_events().contains(&GameEvent::Audio(AudioCue::Shoot)));

        for _ in 0..20 {
            tick(&mut state, &CommandSet::default());
        }
        assert_eq!(state.economy.score, 100);
        assert!(state.store.objects.is_empty());
    }

    #[test]
    fn test_compact_runs_every_step() {
        let mut state = quiet_run();
        state
            .store
            .spawn(Entity::new(EntityKind::EnemyShip, Vec2::new(60.0, 849.0)));
        tick(&mut state, &CommandSet::default());
        assert!(state.store.objects.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = RunState::new(99_999, Tuning::default());
        let mut b = RunState::new(99_999, Tuning::default());
        a.start().unwrap();
        b.start().unwrap();

        let inputs = [
            CommandSet {
                left: true,
                ..Default::default()
            },
            CommandSet {
                fire: true,
                up: true,
                ..Default::default()
            },
            CommandSet::default(),
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.economy, b.economy);
        assert_eq!(a.store.objects, b.store.objects);
        assert_eq!(a.player, b.player);
    }
}
