//! Audio cue sinks
//!
//! The simulation never synthesizes sound; it raises [`AudioCue`]s and the
//! host forwards them here. Sinks are fire-and-forget.

use crate::settings::Settings;
use crate::sim::AudioCue;

/// Receiver of audio cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Records cues in order (tests, replays)
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    pub cues: Vec<AudioCue>,
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

/// Audio manager for the game
///
/// Tracks engine loop state and volume; the actual voice playback belongs to
/// the platform layer, so cues are logged with the volume they would use.
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    engine_running: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            engine_running: false,
            played: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn engine_running(&self) -> bool {
        self.engine_running
    }

    /// Number of one-shot cues actually voiced
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: AudioCue) {
        // Engine loop state is tracked even while muted
        match cue {
            AudioCue::EngineStart => {
                // Already running
                if self.engine_running {
                    return;
                }
                self.engine_running = true;
            }
            AudioCue::EngineStop => {
                if !self.engine_running {
                    return;
                }
                self.engine_running = false;
            }
            _ => {}
        }

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if !matches!(cue, AudioCue::EngineStart | AudioCue::EngineStop) {
            self.played += 1;
        }
        log::debug!("audio: {} (vol {:.2})", cue.as_str(), vol);
    }
}
