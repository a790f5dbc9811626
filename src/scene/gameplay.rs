use std::time::{SystemTime, UNIX_EPOCH};

use macroquad::prelude::*;
use tracing::{error, info, warn};

use crate::audio::SongPlayer;
use crate::chart::{ChartLoader, SongEntry};
use crate::game::{GameState, GameTimer, JudgeWindow, PlayResult, TrackLayout};
use crate::input::InputHandler;
use crate::render::TrackRenderer;

use super::{AppContext, ResultScene, Scene, SceneTransition};

/// Grace period after the last resolvable event before the play ends.
const FINISH_GRACE_MS: f64 = 1500.0;

pub struct GameplayScene {
    entry: SongEntry,
    state: Option<GameState>,
    renderer: Option<TrackRenderer>,
    input: InputHandler,
    timer: GameTimer,
    song: Option<SongPlayer>,
    song_end_ms: f64,
    loaded: bool,
    paused: bool,
}

impl GameplayScene {
    pub fn new(entry: SongEntry) -> Self {
        Self {
            entry,
            state: None,
            renderer: None,
            input: InputHandler::new(),
            timer: GameTimer::new(),
            song: None,
            song_end_ms: 0.0,
            loaded: false,
            paused: false,
        }
    }

    /// Deferred setup: screen geometry is only known once the first
    /// frame runs.
    fn load(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
        let chart = ChartLoader::load(&self.entry.chart_path)?;

        let window = JudgeWindow::standard();
        let layout = TrackLayout::new(
            0.0,
            screen_height(),
            ctx.settings.fall_speed,
            window.earliest_ms(),
        );
        let fall_delay = layout.fall_delay_ms();

        self.input = InputHandler::from_settings(&ctx.settings);
        self.renderer = Some(TrackRenderer::new(screen_width() * 0.4));
        self.song_end_ms = fall_delay + chart.metadata.song_length;

        if let Some(audio) = &mut ctx.audio {
            audio.stop_bgm(ctx.settings.bgm_fade_ms);

            let audio_path = ctx.settings.media_dir.join(chart.metadata.audio_file_name());
            match audio.load(&audio_path) {
                Ok(data) => {
                    self.song = Some(SongPlayer::new(
                        data,
                        fall_delay,
                        ctx.settings.delay_correction_ms,
                        ctx.settings.song_volume,
                    ));
                }
                Err(e) => warn!("Song audio unavailable, playing silent: {e:#}"),
            }
        }

        info!(
            song = %chart.metadata.song_name,
            notes = chart.note_count(),
            "starting play"
        );
        self.state = Some(GameState::new(&chart, layout, window));
        self.timer.reset();
        self.timer.start();
        Ok(())
    }

    fn stop_song(&mut self) {
        if let Some(song) = &mut self.song {
            song.stop();
        }
    }

    /// Pause or resume the play: the game clock and the song move
    /// together so notes stay in sync with the music.
    fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            self.timer.stop();
            if let Some(song) = &mut self.song {
                song.pause();
            }
        } else {
            self.timer.start();
            if let Some(song) = &mut self.song {
                song.resume();
            }
        }
    }

    fn finish(&mut self, ctx: &mut AppContext, result: PlayResult) -> SceneTransition {
        self.stop_song();

        if let Some(db) = &ctx.scores {
            let date = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0);
            if let Err(e) = db.record_play(&result, date) {
                warn!("Failed to persist score: {e:#}");
            }
        }

        SceneTransition::Replace(Box::new(ResultScene::new(result, self.entry.clone())))
    }
}

impl Scene for GameplayScene {
    fn update(&mut self, ctx: &mut AppContext) -> SceneTransition {
        if !self.loaded {
            if let Err(e) = self.load(ctx) {
                error!("Error loading chart: {e:#}");
                return SceneTransition::Pop;
            }
            self.loaded = true;
        }

        if is_key_pressed(KeyCode::Escape) {
            self.stop_song();
            return SceneTransition::Pop;
        }

        if is_key_pressed(KeyCode::Space) {
            let paused = self.paused;
            self.set_paused(!paused);
        }
        if self.paused {
            return SceneTransition::None;
        }

        let elapsed = self.timer.elapsed_ms();
        let Some(state) = self.state.as_mut() else {
            return SceneTransition::None;
        };
        state.update(elapsed);

        for track in self.input.pressed_tracks() {
            state.hit(track);
        }

        let mut song_failed = false;
        if let (Some(song), Some(audio)) = (&mut self.song, &mut ctx.audio) {
            if let Err(e) = song.update(elapsed, audio) {
                warn!("Song playback failed: {e:#}");
                song_failed = true;
            }
        }

        let song_done = self.song.as_ref().map_or(true, |s| s.is_finished());
        let past_end = elapsed > self.song_end_ms + FINISH_GRACE_MS;
        let done = self.state.as_ref().is_some_and(|s| s.notes_exhausted())
            && (song_done || past_end);

        if song_failed {
            self.song = None;
        }
        if done {
            let result = self
                .state
                .as_ref()
                .map(|s| s.result())
                .unwrap_or_default();
            return self.finish(ctx, result);
        }

        SceneTransition::None
    }

    fn draw(&self) {
        let (Some(state), Some(renderer)) = (&self.state, &self.renderer) else {
            clear_background(BLACK);
            return;
        };
        renderer.draw(state, &self.input);

        if self.paused {
            let center_x = screen_width() / 2.0;
            let center_y = screen_height() / 2.0;
            draw_text("PAUSED", center_x - 80.0, center_y, 48.0, WHITE);
            draw_text(
                "[Space] Resume  |  [Esc] Quit",
                center_x - 140.0,
                center_y + 40.0,
                20.0,
                GRAY,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Metadata;

    fn entry() -> SongEntry {
        SongEntry {
            chart_path: "charts/test.json".into(),
            metadata: Metadata {
                song_name: "Test".into(),
                song_author: "Tester".into(),
                song_length: 10_000.0,
                song_image_path: String::new(),
            },
        }
    }

    #[test]
    fn test_pause_freezes_and_resume_continues_timer() {
        let mut scene = GameplayScene::new(entry());
        scene.timer.start();
        assert!(scene.timer.is_running());

        scene.set_paused(true);
        assert!(scene.paused);
        assert!(!scene.timer.is_running());

        scene.set_paused(false);
        assert!(!scene.paused);
        assert!(scene.timer.is_running());
    }

    #[test]
    fn test_redundant_pause_is_a_no_op() {
        let mut scene = GameplayScene::new(entry());
        scene.timer.start();
        scene.set_paused(false);
        assert!(scene.timer.is_running());

        scene.set_paused(true);
        scene.set_paused(true);
        assert!(!scene.timer.is_running());
    }
}
