//! Audio playback: kira-backed sound manager plus the per-play song
//! player that starts the track in sync with the falling notes.

mod manager;
mod player;

use kira::Decibels;

pub use manager::SoundManager;
pub use player::SongPlayer;

/// Convert a 0.0-1.0 amplitude ratio (the unit used by settings) into
/// kira's decibel scale. Zero or negative amplitude maps to silence.
pub(crate) fn amplitude_db(amplitude: f64) -> Decibels {
    if amplitude <= 0.0 {
        Decibels::SILENCE
    } else {
        Decibels((20.0 * amplitude.log10()) as f32)
    }
}
