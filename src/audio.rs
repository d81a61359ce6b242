//! Sound effect routing
//!
//! The simulation raises [`GameEvent`]s; this module maps them to sound
//! effects and hands them to whatever synthesizer the platform provides.
//! Without a backend every call is a silent no-op.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Volley fired
    Fire,
    /// Enemy destroyed
    Explosion,
    /// Ship rammed
    PlayerHit,
    /// Level cleared
    LevelUp,
    /// Game over
    GameOver,
    /// Final level cleared
    Win,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Effect for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Fire => SoundEffect::Fire,
            GameEvent::EnemyDestroyed { .. } => SoundEffect::Explosion,
            GameEvent::PlayerHit { .. } => SoundEffect::PlayerHit,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
            GameEvent::Win { .. } => SoundEffect::Win,
        }
    }
}

/// Platform synthesizer
pub trait AudioBackend {
    /// Start playing an effect at `volume` (0.0 - 1.0); must not block
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    /// Manager with a backend
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::silent()
        }
    }

    /// Manager without a backend (audio unavailable)
    pub fn silent() -> Self {
        let defaults = Settings::default();
        Self {
            backend: None,
            master_volume: defaults.master_volume,
            sfx_volume: defaults.sfx_volume,
            music_volume: defaults.music_volume,
            muted: defaults.muted,
        }
    }

    /// Take volume and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
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

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume, for the platform's music layer
    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, vol);
    }

    /// Play the effect for each event, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}
