//! Persisted player settings.
//!
//! Volume, input sensitivity, and the high score survive between sessions in
//! a small JSON file. Loading falls back to defaults when the file is
//! missing or malformed (logged, never fatal); saving happens on change.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS_PATH: &str = "./settings.json";

fn default_volume() -> f32 {
    1.0
}

fn default_sensitivity() -> f32 {
    1.0
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Master audio volume in [0, 1].
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Input sensitivity multiplier.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Best score across runs.
    #[serde(default)]
    pub high_score: i32,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            sensitivity: default_sensitivity(),
            high_score: 0,
            path: PathBuf::from(DEFAULT_SETTINGS_PATH),
        }
    }
}

impl PlayerSettings {
    /// Load settings from `path`, falling back to defaults on any error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut settings = match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<PlayerSettings>(&text) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Malformed settings file {:?}: {}; using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                info!("No settings file at {:?} ({}); using defaults", path, e);
                Self::default()
            }
        };
        settings.path = path.to_path_buf();
        settings
    }

    /// Write the current settings to their file.
    pub fn save(&self) -> Result<(), String> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(&self.path, text)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;
        Ok(())
    }

    /// Record a new high score if `score` beats the stored one.
    /// Returns true when the score was a new best.
    pub fn record_score(&mut self, score: i32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = PlayerSettings::default();
        assert_eq!(s.volume, 1.0);
        assert_eq!(s.sensitivity, 1.0);
        assert_eq!(s.high_score, 0);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let s = PlayerSettings::load("/nonexistent/settings.json");
        assert_eq!(s.high_score, 0);
    }

    #[test]
    fn test_record_score_keeps_best() {
        let mut s = PlayerSettings::default();
        assert!(s.record_score(100));
        assert!(!s.record_score(50));
        assert_eq!(s.high_score, 100);
        assert!(s.record_score(150));
        assert_eq!(s.high_score, 150);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("skycourier_settings_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        let mut s = PlayerSettings::load(&path);
        s.volume = 0.5;
        s.high_score = 1234;
        s.save().unwrap();
        let loaded = PlayerSettings::load(&path);
        assert_eq!(loaded.volume, 0.5);
        assert_eq!(loaded.high_score, 1234);
        std::fs::remove_file(&path).ok();
    }
}
