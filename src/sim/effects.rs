//! Particle bursts and audio cue requests
//!
//! Purely cosmetic output: nothing here feeds back into collision or the
//! economy.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{AudioCue, GameEvent, Particle, RunState};

/// Color scheme for an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    /// Enemy destroyed
    Enemy,
    /// Fuel pickup shot down
    Penalty,
    /// Player jet lost
    PlayerDestroyed,
}

impl Palette {
    /// The two alternating colors (0xRRGGBB)
    pub fn colors(self) -> [u32; 2] {
        match self {
            Palette::Enemy => [0xfbbf24, 0xef4444],
            Palette::Penalty => [0xf472b6, 0xbe185d],
            Palette::PlayerDestroyed => [0xffffff, 0xfbbf24],
        }
    }
}

/// Afterburner glow color
const TRAIL_COLOR: u32 = 0xf59e0b;

/// Raise a single audio cue
pub fn cue(state: &mut RunState, cue: AudioCue) {
    state.events.push(GameEvent::Audio(cue));
}

/// Burst of particles at `center` plus one explosion cue
pub fn explosion(state: &mut RunState, center: Vec2, palette: Palette) {
    let colors = palette.colors();
    let speed = state.tuning.explosion_speed;
    let cap = state.tuning.max_particles;
    for i in 0..state.tuning.explosion_particles {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 2.0 * speed,
            (state.rng.random::<f32>() - 0.5) * 2.0 * speed,
        );
        let size = state.rng.random::<f32>() * 5.0 + 2.0;
        state.store.push_particle(
            Particle {
                pos: center,
                vel,
                life: 1.0,
                color: colors[i % 2],
                size,
            },
            cap,
        );
    }
    cue(state, AudioCue::Explosion);
}

/// Single afterburner particle below the player's nozzle
pub fn engine_trail(state: &mut RunState) {
    let nozzle = state.player.pos + Vec2::new(state.player.size.x / 2.0, state.player.size.y);
    let vel = Vec2::new(
        (state.rng.random::<f32>() - 0.5) * 0.5,
        6.0 + state.rng.random::<f32>() * 2.0,
    );
    let size = state.rng.random::<f32>() * 4.0 + 4.0;
    let cap = state.tuning.max_particles;
    state.store.push_particle(
        Particle {
            pos: nozzle + Vec2::new(0.0, 8.0),
            vel,
            life: 0.4,
            color: TRAIL_COLOR,
            size,
        },
        cap,
    );
}
