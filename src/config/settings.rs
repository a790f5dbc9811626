use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::chart::TRACK_COUNT;

/// User settings, persisted as JSON in the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Song playback volume (0.0 - 1.0).
    pub song_volume: f64,
    /// Background music volume (0.0 - 1.0).
    pub bgm_volume: f64,
    /// Sound effect volume (0.0 - 1.0).
    pub effect_volume: f64,
    /// BGM fade in/out length in ms.
    pub bgm_fade_ms: f64,
    /// Note fall speed in px per second.
    pub fall_speed: f32,
    /// Audio start lead subtracted from the fall delay, compensating for
    /// playback startup latency.
    pub delay_correction_ms: f64,
    /// Lane key bindings, leftmost track first.
    pub key_bindings: [char; TRACK_COUNT],
    /// Directory scanned for chart JSON files.
    pub chart_dir: PathBuf,
    /// Directory holding song audio files.
    pub media_dir: PathBuf,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            song_volume: 0.10,
            bgm_volume: 0.05,
            effect_volume: 1.0,
            bgm_fade_ms: 1000.0,
            fall_speed: 600.0,
            delay_correction_ms: 300.0,
            key_bindings: ['D', 'F', 'J', 'K'],
            chart_dir: PathBuf::from("assets/chart"),
            media_dir: PathBuf::from("assets/media"),
        }
    }
}

impl GameSettings {
    /// Load settings from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_file().unwrap_or_default()
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::settings_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("org", "notiva", "BeatRush") {
            Ok(proj_dirs.config_dir().join("settings.json"))
        } else {
            Ok(PathBuf::from(".beatrush-settings.json"))
        }
    }
}
