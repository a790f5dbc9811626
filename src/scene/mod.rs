//! Scene stack and the shared services scenes draw on.

mod gameplay;
mod result;
mod song_select;
mod start_menu;

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use tracing::warn;

use crate::audio::SoundManager;
use crate::config::GameSettings;
use crate::database::ScoreDatabase;

pub use gameplay::GameplayScene;
pub use result::ResultScene;
pub use song_select::SongSelectScene;
pub use start_menu::StartMenuScene;

pub enum SceneTransition {
    None,
    Push(Box<dyn Scene>),
    Pop,
    Replace(Box<dyn Scene>),
    Quit,
}

pub trait Scene {
    fn update(&mut self, ctx: &mut AppContext) -> SceneTransition;
    fn draw(&self);

    /// Called when a scene above this one is popped and this scene
    /// becomes the top of the stack again.
    fn on_resume(&mut self, _ctx: &mut AppContext) {}
}

/// Services shared by every scene. Audio and the score database are
/// optional: the game stays playable without a sound device or a
/// writable data directory.
pub struct AppContext {
    pub settings: GameSettings,
    pub audio: Option<SoundManager>,
    pub scores: Option<ScoreDatabase>,
}

impl AppContext {
    pub fn new(settings: GameSettings) -> Self {
        let audio = match SoundManager::new() {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("Audio unavailable, continuing without sound: {e:#}");
                None
            }
        };
        let scores = match Self::open_score_db() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("Score database unavailable, scores will not persist: {e:#}");
                None
            }
        };

        Self {
            settings,
            audio,
            scores,
        }
    }

    fn open_score_db() -> Result<ScoreDatabase> {
        let path = ProjectDirs::from("org", "notiva", "BeatRush")
            .map(|dirs| dirs.data_dir().join("scores.db"))
            .unwrap_or_else(|| PathBuf::from("scores.db"));
        ScoreDatabase::open(&path)
    }

    /// Path of the menu background music, if the file exists.
    pub fn bgm_path(&self) -> Option<PathBuf> {
        let path = self.settings.media_dir.join("bgm.mp3");
        path.exists().then_some(path)
    }

    /// Play the menu confirm sound, if audio and the effect file are
    /// available.
    pub fn play_confirm_effect(&mut self) {
        let path = self.settings.media_dir.join("select.mp3");
        if !path.exists() {
            return;
        }
        if let Some(audio) = &mut self.audio {
            if let Err(e) = audio.play_effect(&path, self.settings.effect_volume) {
                warn!("Failed to play confirm sound: {e:#}");
            }
        }
    }
}
