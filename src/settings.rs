//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file named by
//! `BLOCK_BREAKER_SETTINGS` natively.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Soft halo around the ball
    pub ball_glow: bool,
    /// Shine/shade gradient over the paddle
    pub paddle_gradient: bool,
    /// Light edge around each block
    pub block_outlines: bool,

    // === Demo ===
    /// Let the AI drive the paddle
    pub autopilot: bool,
    /// Seed for the autopilot's aim
    pub autopilot_seed: u64,

    // === Accessibility ===
    /// Reduced motion (drops the glow halo)
    pub reduced_motion: bool,

    /// Gameplay balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_glow: true,
            paddle_gradient: true,
            block_outlines: true,
            autopilot: false,
            autopilot_seed: 0x5EED,
            reduced_motion: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Effective ball glow (respects reduced_motion)
    pub fn effective_ball_glow(&self) -> bool {
        self.ball_glow && !self.reduced_motion
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    /// Serialize for storage
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Flip the autopilot preference. Enabling records `seed` so a reload
    /// replays the same demo. Returns the seed to drive with, if enabled.
    pub fn toggle_autopilot(&mut self, seed: u64) -> Option<u64> {
        self.autopilot = !self.autopilot;
        if self.autopilot {
            self.autopilot_seed = seed;
            Some(seed)
        } else {
            None
        }
    }

    /// Parse settings, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_breaker_settings";

    /// Environment variable naming the native settings file
    pub const ENV_VAR: &'static str = "BLOCK_BREAKER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `BLOCK_BREAKER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_drops_glow() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_ball_glow());
        assert!(Settings::default().effective_ball_glow());
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{ "autopilot": true, "tuning": { "starting_lives": 5 } }"#)
                .unwrap();
        assert!(settings.autopilot);
        assert!(settings.block_outlines);
        assert_eq!(settings.tuning.starting_lives, 5);
        assert_eq!(settings.tuning.block_points, 10);
    }

    #[test]
    fn test_tuning_is_sanitized() {
        let settings = Settings::from_json(r#"{ "tuning": { "bounce_damping": 3.0 } }"#).unwrap();
        assert!(settings.tuning.bounce_damping < 1.0);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Settings::from_json_or_default("]["), Settings::default());
    }

    #[test]
    fn test_autopilot_toggle_survives_storage() {
        let mut settings = Settings::default();
        assert_eq!(settings.toggle_autopilot(77), Some(77));
        assert!(settings.autopilot);

        let stored = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(stored, settings);
        assert_eq!(stored.autopilot_seed, 77);

        assert_eq!(settings.toggle_autopilot(99), None);
        assert!(!settings.autopilot);
        // Seed of the last enabled run is kept
        assert_eq!(settings.autopilot_seed, 77);
    }
}
