//! Run lifecycle transitions
//!
//! Idle → Playing → (LevelComplete → Playing)* → GameOver → Playing ...
//! Host actions (`start`, `advance`, `restart`) are checked against the
//! current phase; the simulation itself only ever leaves `Playing`.

use super::effects;
use super::spawn;
use super::state::{AudioCue, Economy, GameEvent, GamePhase, Player, RunState, ScrollState};
use crate::error::{LifecycleAction, TransitionError};

impl RunState {
    /// Begin a new run from `Idle` (or from `GameOver`, same as restart)
    pub fn start(&mut self) -> Result<(), TransitionError> {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.begin_run();
                Ok(())
            }
            from => Err(TransitionError {
                action: LifecycleAction::Start,
                from,
            }),
        }
    }

    /// Start over after the run ended
    pub fn restart(&mut self) -> Result<(), TransitionError> {
        if self.phase != GamePhase::GameOver {
            return Err(TransitionError {
                action: LifecycleAction::Restart,
                from: self.phase,
            });
        }
        self.begin_run();
        Ok(())
    }

    /// Move on to the next level, keeping score and lives
    pub fn advance(&mut self) -> Result<(), TransitionError> {
        if self.phase != GamePhase::LevelComplete {
            return Err(TransitionError {
                action: LifecycleAction::Advance,
                from: self.phase,
            });
        }
        self.economy.level += 1;
        self.economy.fuel = self.tuning.max_fuel;
        self.player = Player::level_start(&self.tuning);
        self.reset_level();
        self.enter_playing();
        log::info!(
            "Advanced to level {} (score {})",
            self.economy.level,
            self.economy.score
        );
        Ok(())
    }

    /// Playing → GameOver; raises the one game-over notification of the run
    pub(crate) fn end_run(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::Playing);
        self.phase = GamePhase::GameOver;
        effects::cue(self, AudioCue::EngineStop);
        self.events.push(GameEvent::GameOver {
            score: self.economy.score,
            level: self.economy.level,
        });
        log::info!(
            "Game over on level {} with score {}",
            self.economy.level,
            self.economy.score
        );
    }

    /// Playing → LevelComplete
    pub(crate) fn complete_level(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::Playing);
        self.phase = GamePhase::LevelComplete;
        effects::cue(self, AudioCue::EngineStop);
        self.events.push(GameEvent::LevelComplete {
            level: self.economy.level,
        });
        log::info!(
            "Level {} complete after {} steps",
            self.economy.level,
            self.level_ticks
        );
    }

    fn begin_run(&mut self) {
        self.economy = Economy::new_run(self.tuning.max_fuel);
        self.player = Player::run_start(&self.tuning);
        self.reset_level();
        self.enter_playing();
        log::info!("Run started (seed {})", self.seed);
    }

    /// Clear everything scoped to a single level and seed the opening ladder
    fn reset_level(&mut self) {
        self.scroll = ScrollState::default();
        self.level_ticks = 0;
        self.store.clear();
        spawn::seed_opening_ladder(self);
    }

    fn enter_playing(&mut self) {
        self.phase = GamePhase::Playing;
        effects::cue(self, AudioCue::EngineStart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn run() -> RunState {
        RunState::new(1234, Tuning::default())
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = run();
        state.start().unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.economy.level, 1);
        assert_eq!(state.economy.score, 0);
        assert_eq!(state.economy.fuel, state.tuning.max_fuel);
        assert_eq!(state.scroll.level_distance, 0.0);
        assert!(!state.store.objects.is_empty());
        assert!(state.events.contains(&GameEvent::Audio(AudioCue::EngineStart)));
    }

    #[test]
    fn test_advance_keeps_score_and_refuels() {
        let mut state = run();
        state.start().unwrap();
        state.economy.score = 1250;
        state.economy.fuel = 12.0;
        state.scroll.level_distance = 4001.0;
        state.complete_level();

        state.advance().unwrap();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.economy.level, 2);
        assert_eq!(state.economy.score, 1250);
        assert_eq!(state.economy.fuel, 300.0);
        assert_eq!(state.economy.lives, 3);
        assert_eq!(state.scroll.level_distance, 0.0);
        assert_eq!(state.level_ticks, 0);
        assert_eq!(state.player, Player::level_start(&state.tuning));
    }

    #[test]
    fn test_restart_is_a_full_reset() {
        let mut state = run();
        state.start().unwrap();
        state.complete_level();
        state.advance().unwrap();
        state.economy.score = 900;
        state.end_run();

        state.restart().unwrap();

        assert_eq!(state.economy.level, 1);
        assert_eq!(state.economy.score, 0);
        assert_eq!(state.player, Player::run_start(&state.tuning));
    }

    #[test]
    fn test_illegal_transitions_are_rejected() {
        let mut state = run();
        assert_eq!(
            state.advance(),
            Err(TransitionError {
                action: LifecycleAction::Advance,
                from: GamePhase::Idle,
            })
        );
        assert!(state.restart().is_err());

        state.start().unwrap();
        assert!(state.start().is_err());
        assert!(state.advance().is_err());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_notification_raised_once() {
        let mut state = run();
        state.start().unwrap();
        state.economy.score = 40;
        state.end_run();
        let over: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(over, vec![GameEvent::GameOver { score: 40, level: 1 }]);
    }
}
