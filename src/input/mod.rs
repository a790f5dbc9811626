//! Lane key bindings and per-frame key queries.

use macroquad::prelude::*;

use crate::chart::{TRACK_COUNT, TrackId};
use crate::config::GameSettings;

const DEFAULT_BINDINGS: [KeyCode; TRACK_COUNT] =
    [KeyCode::D, KeyCode::F, KeyCode::J, KeyCode::K];

pub struct InputHandler {
    key_bindings: [KeyCode; TRACK_COUNT],
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_bindings: DEFAULT_BINDINGS,
        }
    }

    /// Resolve bindings from settings; unknown characters fall back to
    /// the default binding for that lane.
    pub fn from_settings(settings: &GameSettings) -> Self {
        let mut key_bindings = DEFAULT_BINDINGS;
        for (lane, ch) in settings.key_bindings.iter().enumerate() {
            if let Some(code) = key_code_for_char(*ch) {
                key_bindings[lane] = code;
            }
        }
        Self { key_bindings }
    }

    /// Tracks whose key went down this frame.
    pub fn pressed_tracks(&self) -> Vec<TrackId> {
        TrackId::ALL
            .into_iter()
            .filter(|track| is_key_pressed(self.key_bindings[track.lane_index()]))
            .collect()
    }

    pub fn is_track_down(&self, track: TrackId) -> bool {
        is_key_down(self.key_bindings[track.lane_index()])
    }

    pub fn binding(&self, track: TrackId) -> KeyCode {
        self.key_bindings[track.lane_index()]
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a config character to its key code. Only letters and digits are
/// bindable.
pub fn key_code_for_char(ch: char) -> Option<KeyCode> {
    match ch.to_ascii_uppercase() {
        'A' => Some(KeyCode::A),
        'B' => Some(KeyCode::B),
        'C' => Some(KeyCode::C),
        'D' => Some(KeyCode::D),
        'E' => Some(KeyCode::E),
        'F' => Some(KeyCode::F),
        'G' => Some(KeyCode::G),
        'H' => Some(KeyCode::H),
        'I' => Some(KeyCode::I),
        'J' => Some(KeyCode::J),
        'K' => Some(KeyCode::K),
        'L' => Some(KeyCode::L),
        'M' => Some(KeyCode::M),
        'N' => Some(KeyCode::N),
        'O' => Some(KeyCode::O),
        'P' => Some(KeyCode::P),
        'Q' => Some(KeyCode::Q),
        'R' => Some(KeyCode::R),
        'S' => Some(KeyCode::S),
        'T' => Some(KeyCode::T),
        'U' => Some(KeyCode::U),
        'V' => Some(KeyCode::V),
        'W' => Some(KeyCode::W),
        'X' => Some(KeyCode::X),
        'Y' => Some(KeyCode::Y),
        'Z' => Some(KeyCode::Z),
        '0' => Some(KeyCode::Key0),
        '1' => Some(KeyCode::Key1),
        '2' => Some(KeyCode::Key2),
        '3' => Some(KeyCode::Key3),
        '4' => Some(KeyCode::Key4),
        '5' => Some(KeyCode::Key5),
        '6' => Some(KeyCode::Key6),
        '7' => Some(KeyCode::Key7),
        '8' => Some(KeyCode::Key8),
        '9' => Some(KeyCode::Key9),
        _ => None,
    }
}
