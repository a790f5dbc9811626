use anyhow::Result;
use kira::Tween;
use kira::sound::PlaybackState;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use tracing::debug;

use super::{SoundManager, amplitude_db};

/// Plays the song for one chart run.
///
/// Notes spawn at their chart timestamp and take the track's fall delay
/// to reach the judgement line, so the audio must start that much later
/// than the engine clock, minus a correction for playback startup
/// latency. [`SongPlayer::update`] is polled every frame with the
/// engine's elapsed time and starts playback once the moment arrives.
pub struct SongPlayer {
    data: StaticSoundData,
    handle: Option<StaticSoundHandle>,
    start_at_ms: f64,
    volume: f64,
    started: bool,
}

impl SongPlayer {
    pub fn new(data: StaticSoundData, fall_delay_ms: f64, delay_correction_ms: f64, volume: f64) -> Self {
        Self {
            data,
            handle: None,
            start_at_ms: (fall_delay_ms - delay_correction_ms).max(0.0),
            volume,
            started: false,
        }
    }

    /// Start playback once the engine clock passes the start point.
    pub fn update(&mut self, elapsed_ms: f64, audio: &mut SoundManager) -> Result<()> {
        if self.started || elapsed_ms < self.start_at_ms {
            return Ok(());
        }
        debug!(elapsed_ms, "starting song playback");
        let handle = audio.play(self.data.clone().volume(amplitude_db(self.volume)))?;
        self.handle = Some(handle);
        self.started = true;
        Ok(())
    }

    pub fn pause(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.pause(Tween::default());
        }
    }

    pub fn resume(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.resume(Tween::default());
        }
    }

    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop(Tween::default());
        }
        self.started = false;
    }

    /// True once playback started and has run to the end.
    pub fn is_finished(&self) -> bool {
        self.started
            && self
                .handle
                .as_ref()
                .is_none_or(|h| h.state() == PlaybackState::Stopped)
    }

    pub fn duration_ms(&self) -> f64 {
        self.data.duration().as_secs_f64() * 1000.0
    }

    pub fn start_at_ms(&self) -> f64 {
        self.start_at_ms
    }
}
