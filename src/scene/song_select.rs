use macroquad::prelude::*;
use tracing::{error, warn};

use crate::chart::{ChartLoader, SongEntry};
use crate::database::ScoreRecord;
use crate::util::format_clock;

use super::{AppContext, GameplayScene, Scene, SceneTransition};

pub struct SongSelectScene {
    songs: Vec<SongEntry>,
    best: Vec<Option<ScoreRecord>>,
    selected_index: usize,
    scroll_offset: usize,
    visible_count: usize,
    scan_error: Option<String>,
}

impl SongSelectScene {
    pub fn new(ctx: &AppContext) -> Self {
        let mut scan_error = None;
        let songs = match ChartLoader::scan(&ctx.settings.chart_dir) {
            Ok(songs) => songs,
            Err(e) => {
                error!("Chart scan failed: {e}");
                scan_error = Some(e.to_string());
                Vec::new()
            }
        };

        let best = songs
            .iter()
            .map(|song| Self::best_score(ctx, &song.metadata.song_name))
            .collect();

        Self {
            songs,
            best,
            selected_index: 0,
            scroll_offset: 0,
            visible_count: 12,
            scan_error,
        }
    }

    fn best_score(ctx: &AppContext, song_name: &str) -> Option<ScoreRecord> {
        let db = ctx.scores.as_ref()?;
        match db.get_score(song_name) {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to read score for {song_name}: {e:#}");
                None
            }
        }
    }

    /// Refresh best scores, e.g. after returning from a play.
    fn reload_best(&mut self, ctx: &AppContext) {
        self.best = self
            .songs
            .iter()
            .map(|song| Self::best_score(ctx, &song.metadata.song_name))
            .collect();
    }

    fn update_scroll(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + self.visible_count {
            self.scroll_offset = self.selected_index - self.visible_count + 1;
        }
    }
}

impl Scene for SongSelectScene {
    fn update(&mut self, ctx: &mut AppContext) -> SceneTransition {
        let bgm_path = ctx.bgm_path();
        if let (Some(audio), Some(bgm)) = (&mut ctx.audio, bgm_path) {
            if !audio.is_bgm_playing() {
                if let Err(e) =
                    audio.play_bgm(&bgm, ctx.settings.bgm_volume, ctx.settings.bgm_fade_ms)
                {
                    warn!("Failed to resume menu BGM: {e:#}");
                }
            }
        }

        if is_key_pressed(KeyCode::Escape) {
            return SceneTransition::Pop;
        }

        if self.songs.is_empty() {
            return SceneTransition::None;
        }

        if is_key_pressed(KeyCode::Up) && self.selected_index > 0 {
            self.selected_index -= 1;
            self.update_scroll();
        }

        if is_key_pressed(KeyCode::Down) && self.selected_index < self.songs.len() - 1 {
            self.selected_index += 1;
            self.update_scroll();
        }

        if is_key_pressed(KeyCode::Enter) {
            ctx.play_confirm_effect();
            let song = self.songs[self.selected_index].clone();
            return SceneTransition::Push(Box::new(GameplayScene::new(song)));
        }

        SceneTransition::None
    }

    /// A play just finished (or was aborted) above us, so the stored
    /// best scores may be stale.
    fn on_resume(&mut self, ctx: &mut AppContext) {
        self.reload_best(ctx);
    }

    fn draw(&self) {
        clear_background(Color::new(0.05, 0.05, 0.1, 1.0));

        draw_text("SONG SELECT", 20.0, 40.0, 32.0, WHITE);
        draw_text(
            &format!("{} songs found", self.songs.len()),
            20.0,
            70.0,
            20.0,
            GRAY,
        );

        if self.songs.is_empty() {
            let message = match &self.scan_error {
                Some(e) => format!("Chart scan failed: {e}"),
                None => "No charts found in the chart directory.".to_string(),
            };
            draw_text(&message, 20.0, screen_height() / 2.0, 24.0, YELLOW);
            return;
        }

        let start_y = 100.0;
        let item_height = 44.0;

        for (i, song) in self
            .songs
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.visible_count)
        {
            let y = start_y + (i - self.scroll_offset) as f32 * item_height;
            let is_selected = i == self.selected_index;

            if is_selected {
                draw_rectangle(
                    10.0,
                    y - 5.0,
                    screen_width() - 20.0,
                    item_height,
                    Color::new(0.2, 0.3, 0.5, 1.0),
                );
            }

            let color = if is_selected { YELLOW } else { WHITE };
            draw_text(&song.metadata.song_name, 30.0, y + 18.0, 22.0, color);
            draw_text(
                &format!(
                    "{}  ({})",
                    song.metadata.song_author,
                    format_clock(song.metadata.song_length)
                ),
                30.0,
                y + 36.0,
                14.0,
                GRAY,
            );

            if let Some(Some(record)) = self.best.get(i) {
                draw_text(
                    &format!("{}  {}", record.grade, record.total_score),
                    screen_width() - 180.0,
                    y + 24.0,
                    20.0,
                    Color::new(0.5, 1.0, 0.6, 1.0),
                );
            }
        }

        draw_text(
            "[Up/Down] Select | [Enter] Play | [Esc] Back",
            20.0,
            screen_height() - 20.0,
            16.0,
            GRAY,
        );
    }
}
