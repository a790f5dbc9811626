use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use kira::backend::DefaultBackend;
use kira::sound::PlaybackState;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, Tween};

use super::amplitude_db;

/// Sound manager backed by kira for low-latency playback.
///
/// Decoded sound data is cached by path so menu effects and repeated
/// previews don't hit the disk twice. Volumes are taken as 0.0-1.0
/// amplitude ratios and converted to decibels at this boundary.
pub struct SoundManager {
    manager: AudioManager,
    cache: HashMap<PathBuf, StaticSoundData>,
    bgm: Option<StaticSoundHandle>,
}

impl SoundManager {
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("Failed to create audio manager: {e}"))?;
        Ok(Self {
            manager,
            cache: HashMap::new(),
            bgm: None,
        })
    }

    /// Load a sound file, reusing the cached copy if present.
    pub fn load(&mut self, path: &Path) -> Result<StaticSoundData> {
        if let Some(data) = self.cache.get(path) {
            return Ok(data.clone());
        }
        let data = StaticSoundData::from_file(path)
            .with_context(|| format!("Failed to load sound: {}", path.display()))?;
        self.cache.insert(path.to_path_buf(), data.clone());
        Ok(data)
    }

    /// Play a one-shot effect at the given amplitude.
    pub fn play_effect(&mut self, path: &Path, volume: f64) -> Result<()> {
        let data = self.load(path)?.volume(amplitude_db(volume));
        self.manager
            .play(data)
            .map_err(|e| anyhow!("Failed to play effect: {e}"))?;
        Ok(())
    }

    /// Start looping background music, fading in over `fade_ms`. Any
    /// previous BGM is faded out first.
    pub fn play_bgm(&mut self, path: &Path, volume: f64, fade_ms: f64) -> Result<()> {
        self.stop_bgm(fade_ms);

        let data = self.load(path)?.loop_region(0.0..).volume(Decibels::SILENCE);
        let mut handle = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("Failed to play BGM: {e}"))?;
        handle.set_volume(amplitude_db(volume), fade_tween(fade_ms));
        self.bgm = Some(handle);
        Ok(())
    }

    /// Fade the current BGM out and drop its handle.
    pub fn stop_bgm(&mut self, fade_ms: f64) {
        if let Some(mut handle) = self.bgm.take() {
            handle.stop(fade_tween(fade_ms));
        }
    }

    pub fn is_bgm_playing(&self) -> bool {
        self.bgm
            .as_ref()
            .is_some_and(|h| h.state() == PlaybackState::Playing)
    }

    /// Play arbitrary sound data, handing back the playback handle.
    pub fn play(&mut self, data: StaticSoundData) -> Result<StaticSoundHandle> {
        self.manager
            .play(data)
            .map_err(|e| anyhow!("Failed to play sound: {e}"))
    }
}

fn fade_tween(fade_ms: f64) -> Tween {
    Tween {
        duration: Duration::from_millis(fade_ms.max(0.0) as u64),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SoundManager itself needs audio hardware; only the pure helpers
    // are testable here.

    #[test]
    fn test_fade_tween_duration() {
        assert_eq!(fade_tween(1000.0).duration, Duration::from_millis(1000));
        assert_eq!(fade_tween(-5.0).duration, Duration::ZERO);
    }
}
