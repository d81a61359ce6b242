//! Frame host
//!
//! Owns the simulation plus everything around it: input, audio routing,
//! settings and the leaderboard. The platform loop calls [`Game::frame`] once
//! per display refresh and renders from [`Game::state`] afterwards.

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::Leaderboard;
use crate::persistence::KvStore;
use crate::platform::InputState;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, lifecycle, tick};
use crate::tuning::Tuning;
use crate::ui::Hud;

/// Game instance holding all state
pub struct Game<S: KvStore> {
    state: GameState,
    /// Raw input, written by platform event handlers
    pub input: InputState,
    /// Let the ship fly itself (attract mode)
    pub autopilot: bool,
    store: S,
    leaderboard: Leaderboard,
    settings: Settings,
    audio: AudioManager,
    /// Session ended on a score that earns a leaderboard slot
    awaiting_initials: bool,
}

impl<S: KvStore> Game<S> {
    pub fn new(seed: u64, tuning: Tuning, mut store: S, mut audio: AudioManager) -> Self {
        let leaderboard = Leaderboard::load(&mut store);
        let settings = Settings::load(&store);
        audio.apply_settings(&settings);

        Self {
            state: GameState::new(seed, tuning),
            input: InputState::new(),
            autopilot: false,
            store,
            leaderboard,
            settings,
            audio,
            awaiting_initials: false,
        }
    }

    /// Start (or restart) a session
    pub fn start(&mut self) {
        lifecycle::start(&mut self.state);
        self.input.clear();
        self.awaiting_initials = false;
    }

    /// Drop the current session and show the title screen
    pub fn back_to_menu(&mut self) {
        lifecycle::to_menu(&mut self.state);
        self.input.clear();
        self.awaiting_initials = false;
    }

    /// Run one frame at host time `now_ms`; returns the events it raised
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let frame = self.input.take_frame();
        if frame.toggle_mute {
            self.toggle_mute();
        }

        let mut input = frame.tick;
        input.autopilot = self.autopilot;
        tick(&mut self.state, &input, now_ms);

        let events = self.state.drain_events();
        self.audio.play_events(&events);

        for event in &events {
            let score = match *event {
                GameEvent::GameOver { score, .. } | GameEvent::Win { score } => score,
                _ => continue,
            };
            self.awaiting_initials = self.leaderboard.is_high_score(score);
            if self.awaiting_initials {
                log::info!("New high score: {}", score);
                self.audio.play(SoundEffect::HighScore);
            }
        }

        events
    }

    /// Record the finished session's score under `initials`
    ///
    /// Only valid once per qualifying session; returns the rank achieved.
    pub fn submit_initials(&mut self, initials: &str) -> Option<usize> {
        if !self.awaiting_initials {
            return None;
        }
        self.awaiting_initials = false;
        let rank = self
            .leaderboard
            .submit(&mut self.store, initials, self.state.score);
        if let Some(rank) = rank {
            log::info!("Score {} entered at rank {}", self.state.score, rank);
        }
        rank
    }

    /// Flip mute and persist the preference
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.audio.set_muted(self.settings.muted);
        self.settings.save(&mut self.store);
        self.settings.muted
    }

    /// Whether the game-over screen should ask for initials
    pub fn awaiting_initials(&self) -> bool {
        self.awaiting_initials
    }

    /// Read-only simulation snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
