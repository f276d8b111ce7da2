//! Host-facing frame driver
//!
//! The host calls [`Game::frame`] once per display refresh. Input is latched
//! between frames and copied at the start of every step; events raised by a
//! step are delivered before the next step starts.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_SUBSTEPS, STEP_MS};
use crate::error::TransitionError;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{
    Action, CommandSet, GameEvent, GamePhase, RenderSnapshot, RunState, StepOutcome, tick,
};
use crate::tuning::Tuning;

/// Longest frame the driver will try to catch up on
const MAX_FRAME_MS: f64 = 100.0;

type GameOverListener = Box<dyn FnMut(u64, u32)>;

/// Game instance holding a run and its host-side collaborators
pub struct Game {
    state: RunState,
    /// Latched commands, written by the input source between steps
    input: CommandSet,
    accumulator: f64,
    /// Host wall clock (sum of frame times)
    clock_ms: f64,
    audio: Box<dyn AudioSink>,
    listeners: Vec<GameOverListener>,
    high_scores: HighScores,
    snapshot: RenderSnapshot,
    detached: bool,
    steps: u64,
}

impl Game {
    /// Create a game with audio configured from `settings`
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        let tuning = Tuning {
            max_particles: tuning.max_particles.min(settings.max_particles()),
            engine_trail: tuning.engine_trail && settings.engine_trail(),
            ..tuning
        };
        Self::with_audio(seed, tuning, Box::new(AudioManager::from_settings(settings)))
    }

    /// Create a game seeded from system entropy
    pub fn from_entropy(tuning: Tuning, settings: &Settings) -> Self {
        Self::new(rand::random(), tuning, settings)
    }

    pub fn with_audio(seed: u64, tuning: Tuning, audio: Box<dyn AudioSink>) -> Self {
        let state = RunState::new(seed, tuning);
        let snapshot = RenderSnapshot::capture(&state);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            input: CommandSet::default(),
            accumulator: 0.0,
            clock_ms: 0.0,
            audio,
            listeners: Vec::new(),
            high_scores: HighScores::new(),
            snapshot,
            detached: false,
            steps: 0,
        }
    }

    // === Input ===

    pub fn press(&mut self, action: Action) {
        self.input.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        // Fire is one-shot and clears itself after the step that reads it
        if action != Action::Fire {
            self.input.set(action, false);
        }
    }

    /// Press a key by name; unknown keys are ignored
    pub fn press_key(&mut self, key: &str) {
        if let Some(action) = Action::parse(key) {
            self.press(action);
        }
    }

    pub fn release_key(&mut self, key: &str) {
        if let Some(action) = Action::parse(key) {
            self.release(action);
        }
    }

    pub fn set_commands(&mut self, commands: CommandSet) {
        self.input = commands;
    }

    pub fn commands(&self) -> CommandSet {
        self.input
    }

    // === Lifecycle ===

    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.state.start()?;
        self.after_transition();
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), TransitionError> {
        self.state.advance()?;
        self.after_transition();
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), TransitionError> {
        self.state.restart()?;
        self.after_transition();
        Ok(())
    }

    fn after_transition(&mut self) {
        self.state.level_started_at_ms = self.clock_ms;
        self.accumulator = 0.0;
        // A press made outside play never carries into the new level
        self.input.fire = false;
        self.deliver_events();
        self.snapshot = RenderSnapshot::capture(&self.state);
    }

    /// Register a callback for the end-of-run notification (score, level)
    pub fn on_game_over(&mut self, listener: impl FnMut(u64, u32) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // === Frame loop ===

    /// Advance by one display frame; returns the number of steps run
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        if self.detached {
            return 0;
        }
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        self.clock_ms += elapsed;
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= STEP_MS && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= STEP_MS;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(STEP_MS);
        }
        substeps
    }

    /// Run exactly one step against a copy of the latched input
    pub fn step(&mut self) -> StepOutcome {
        let input = self.input;
        let outcome = tick(&mut self.state, &input);

        // Clear one-shot inputs after processing, simulated or not
        self.input.fire = false;
        if outcome.simulated {
            self.steps += 1;
        }

        self.deliver_events();
        self.snapshot = RenderSnapshot::capture(&self.state);
        outcome
    }

    fn deliver_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Audio(cue) => self.audio.play(cue),
                GameEvent::LevelComplete { level } => {
                    log::info!("Sector {} secured", level);
                }
                GameEvent::GameOver { score, level } => {
                    if let Some(rank) = self.high_scores.add_score(score, level, self.state.seed) {
                        log::info!("New high score #{}: {}", rank, score);
                    }
                    for listener in &mut self.listeners {
                        listener(score, level);
                    }
                }
            }
        }
    }

    /// Stop driving; an in-flight step has always completed by now
    pub fn detach(&mut self) {
        if !self.detached {
            log::info!("Frame driver detached after {} steps", self.steps);
        }
        self.detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    // === Accessors ===

    /// Snapshot taken at the end of the last step or transition
    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Steps simulated while playing
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }
}
