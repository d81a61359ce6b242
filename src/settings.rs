//! Game settings and preferences
//!
//! Persisted separately from the leaderboard, under their own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::KvStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// All sound off
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "neonShooter_settings";

    /// Clamp volumes into range (stored data may be hand-edited)
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &impl KvStore) -> Self {
        if let Some(json) = store.read(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                log::info!("Loaded settings");
                return settings.sanitized();
            }
            log::warn!("Ignoring malformed settings");
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut impl KvStore) {
        if let Ok(json) = serde_json::to_string(self) {
            match store.write(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_malformed_and_out_of_range() {
        let mut store = MemoryStore::new();
        store.write(Settings::STORAGE_KEY, "nonsense").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());

        store
            .write(Settings::STORAGE_KEY, r#"{ "master_volume": 4.0 }"#)
            .unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded.master_volume, 1.0);
        assert!(!loaded.muted);
    }
}
