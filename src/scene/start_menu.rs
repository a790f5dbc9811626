use macroquad::prelude::*;
use tracing::warn;

use super::{AppContext, Scene, SceneTransition, SongSelectScene};

pub struct StartMenuScene {
    /// BGM waits for the first key press, so a freshly opened window
    /// stays silent until the player touches the game.
    interacted: bool,
}

impl StartMenuScene {
    pub fn new() -> Self {
        Self { interacted: false }
    }
}

impl Default for StartMenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for StartMenuScene {
    fn update(&mut self, ctx: &mut AppContext) -> SceneTransition {
        if !self.interacted && get_last_key_pressed().is_some() {
            self.interacted = true;
        }

        if self.interacted {
            let bgm_path = ctx.bgm_path();
            if let (Some(audio), Some(bgm)) = (&mut ctx.audio, bgm_path) {
                if !audio.is_bgm_playing() {
                    if let Err(e) =
                        audio.play_bgm(&bgm, ctx.settings.bgm_volume, ctx.settings.bgm_fade_ms)
                    {
                        warn!("Failed to start menu BGM: {e:#}");
                    }
                }
            }
        }

        if is_key_pressed(KeyCode::Enter) {
            ctx.play_confirm_effect();
            return SceneTransition::Push(Box::new(SongSelectScene::new(ctx)));
        }

        if is_key_pressed(KeyCode::Escape) {
            return SceneTransition::Quit;
        }

        SceneTransition::None
    }

    fn draw(&self) {
        clear_background(Color::new(0.02, 0.02, 0.08, 1.0));

        let center_x = screen_width() / 2.0;
        let center_y = screen_height() / 2.0;

        draw_text("BEAT RUSH", center_x - 160.0, center_y - 60.0, 72.0, WHITE);
        draw_text(
            "[Enter] Start  |  [Esc] Quit",
            center_x - 140.0,
            center_y + 40.0,
            24.0,
            GRAY,
        );
    }
}
