//! Gameplay core: timing, judgement, scoring and the play engine.

mod judge;
mod result;
mod score;
mod state;
mod timer;
mod track;

pub use judge::{JudgeWindow, Judgement};
pub use result::PlayResult;
pub use score::ScoreManager;
pub use state::{ActiveNote, GameState};
pub use timer::{GameTimer, MockTimeProvider, SystemTimeProvider, TimeProvider};
pub use track::{Track, TrackLayout};
