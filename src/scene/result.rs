use macroquad::prelude::*;

use crate::chart::SongEntry;
use crate::game::PlayResult;

use super::{AppContext, GameplayScene, Scene, SceneTransition};

pub struct ResultScene {
    result: PlayResult,
    entry: SongEntry,
}

impl ResultScene {
    pub fn new(result: PlayResult, entry: SongEntry) -> Self {
        Self { result, entry }
    }
}

impl Scene for ResultScene {
    fn update(&mut self, _ctx: &mut AppContext) -> SceneTransition {
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
            return SceneTransition::Pop;
        }
        if is_key_pressed(KeyCode::R) {
            return SceneTransition::Replace(Box::new(GameplayScene::new(self.entry.clone())));
        }
        SceneTransition::None
    }

    fn draw(&self) {
        clear_background(Color::new(0.02, 0.02, 0.08, 1.0));

        let center_x = screen_width() / 2.0;

        draw_text("RESULT", center_x - 70.0, 50.0, 40.0, WHITE);

        draw_text(&self.result.song_name, center_x - 150.0, 100.0, 28.0, YELLOW);
        draw_text(&self.result.song_author, center_x - 150.0, 130.0, 20.0, GRAY);

        let grade = self.result.grade();
        let grade_color = match grade {
            "S" => Color::new(1.0, 0.8, 0.0, 1.0),
            "A" => Color::new(0.0, 1.0, 0.5, 1.0),
            "B" => Color::new(0.0, 0.8, 1.0, 1.0),
            "C" => Color::new(0.8, 0.8, 0.8, 1.0),
            _ => WHITE,
        };

        draw_text(grade, center_x - 20.0, 220.0, 80.0, grade_color);
        draw_text(
            &format!("{:.2}%", self.result.accuracy()),
            center_x - 60.0,
            270.0,
            32.0,
            WHITE,
        );

        let stats_x = center_x - 120.0;
        let stats_start_y = 320.0;
        let line_height = 30.0;

        draw_text(
            &format!("SCORE: {}", self.result.total_score),
            stats_x,
            stats_start_y,
            24.0,
            YELLOW,
        );
        draw_text(
            &format!("MAX COMBO: {}", self.result.max_combo),
            stats_x,
            stats_start_y + line_height,
            24.0,
            WHITE,
        );

        draw_text(
            &format!("PERFECT: {}", self.result.perfect_count),
            stats_x,
            stats_start_y + line_height * 3.0,
            20.0,
            Color::new(1.0, 1.0, 0.0, 1.0),
        );
        draw_text(
            &format!("GREAT: {}", self.result.great_count),
            stats_x,
            stats_start_y + line_height * 4.0,
            20.0,
            Color::new(0.0, 1.0, 0.5, 1.0),
        );
        draw_text(
            &format!("GOOD: {}", self.result.good_count),
            stats_x,
            stats_start_y + line_height * 5.0,
            20.0,
            Color::new(0.0, 0.8, 1.0, 1.0),
        );
        draw_text(
            &format!("BAD: {}", self.result.bad_count),
            stats_x,
            stats_start_y + line_height * 6.0,
            20.0,
            Color::new(0.5, 0.5, 1.0, 1.0),
        );
        draw_text(
            &format!("MISS: {}", self.result.miss_count),
            stats_x,
            stats_start_y + line_height * 7.0,
            20.0,
            Color::new(1.0, 0.3, 0.3, 1.0),
        );

        draw_text(
            "[Enter] Continue  |  [R] Replay",
            center_x - 130.0,
            screen_height() - 30.0,
            20.0,
            GRAY,
        );
    }
}
