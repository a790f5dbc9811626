use macroquad::prelude::*;

use crate::chart::{NoteType, TRACK_COUNT, TrackId};
use crate::game::{GameState, Judgement};
use crate::input::InputHandler;

const NOTE_HEIGHT: f32 = 16.0;
const LANE_GAP: f32 = 4.0;

/// Draws the play field: lanes, falling notes, the judgement line and
/// the score HUD. Horizontal geometry lives here; vertical geometry
/// comes from the engine's [`crate::game::TrackLayout`].
pub struct TrackRenderer {
    field_x: f32,
    lane_width: f32,
}

impl TrackRenderer {
    pub fn new(field_width: f32) -> Self {
        Self {
            field_x: (screen_width() - field_width) / 2.0,
            lane_width: field_width / TRACK_COUNT as f32,
        }
    }

    fn lane_x(&self, track: TrackId) -> f32 {
        self.field_x + track.lane_index() as f32 * self.lane_width
    }

    pub fn draw(&self, state: &GameState, input: &InputHandler) {
        clear_background(Color::new(0.03, 0.03, 0.08, 1.0));

        self.draw_lanes(state, input);
        self.draw_notes(state);
        self.draw_hud(state);
    }

    fn draw_lanes(&self, state: &GameState, input: &InputHandler) {
        let layout = state.layout();
        let field_width = self.lane_width * TRACK_COUNT as f32;

        for track in TrackId::ALL {
            let x = self.lane_x(track);
            let pressed = input.is_track_down(track);
            let bg = if pressed {
                Color::new(0.18, 0.18, 0.30, 1.0)
            } else {
                Color::new(0.08, 0.08, 0.14, 1.0)
            };
            draw_rectangle(
                x + LANE_GAP / 2.0,
                layout.top_y,
                self.lane_width - LANE_GAP,
                layout.bottom_y - layout.top_y,
                bg,
            );

            // Key hint under the lane.
            let label = format!("{:?}", input.binding(track));
            draw_text(
                &label,
                x + self.lane_width / 2.0 - 8.0,
                layout.bottom_y - 40.0,
                28.0,
                GRAY,
            );
        }

        draw_line(
            self.field_x,
            layout.judgement_line_y,
            self.field_x + field_width,
            layout.judgement_line_y,
            3.0,
            Color::new(0.9, 0.9, 1.0, 0.9),
        );
    }

    fn draw_notes(&self, state: &GameState) {
        let layout = state.layout();

        for track in TrackId::ALL {
            let x = self.lane_x(track) + LANE_GAP;
            let width = self.lane_width - LANE_GAP * 2.0;

            for active in state.active_notes(track) {
                let y = state.note_y(active);
                if y < layout.top_y - NOTE_HEIGHT || y > layout.end_y {
                    continue;
                }

                match active.note.note_type {
                    NoteType::Tap => {
                        draw_rectangle(
                            x,
                            y - NOTE_HEIGHT,
                            width,
                            NOTE_HEIGHT,
                            Color::new(0.4, 0.8, 1.0, 1.0),
                        );
                    }
                    NoteType::Hold => {
                        // Tail stretches up toward the head's spawn side.
                        let tail = layout.fall_per_ms * active.note.duration_ms as f32;
                        draw_rectangle(
                            x + width * 0.2,
                            y - NOTE_HEIGHT - tail,
                            width * 0.6,
                            tail,
                            Color::new(1.0, 0.7, 0.3, 0.5),
                        );
                        draw_rectangle(
                            x,
                            y - NOTE_HEIGHT,
                            width,
                            NOTE_HEIGHT,
                            Color::new(1.0, 0.7, 0.3, 1.0),
                        );
                    }
                }
            }
        }
    }

    fn draw_hud(&self, state: &GameState) {
        let score = state.score();

        draw_text(
            &format!("SCORE {}", score.total_score),
            20.0,
            40.0,
            32.0,
            WHITE,
        );
        if score.combo > 1 {
            draw_text(
                &format!("{} COMBO", score.combo),
                20.0,
                75.0,
                28.0,
                YELLOW,
            );
        }

        if let Some(judgement) = state.recent_judgement(500.0) {
            let layout = state.layout();
            let color = judgement_color(judgement);
            let center_x = self.field_x + self.lane_width * TRACK_COUNT as f32 / 2.0;
            draw_text(
                judgement.display_name(),
                center_x - 60.0,
                layout.judgement_line_y - 120.0,
                44.0,
                color,
            );
        }
    }
}

fn judgement_color(judgement: Judgement) -> Color {
    match judgement {
        Judgement::Perfect => Color::new(1.0, 0.9, 0.2, 1.0),
        Judgement::Great => Color::new(0.2, 1.0, 0.5, 1.0),
        Judgement::Good => Color::new(0.3, 0.7, 1.0, 1.0),
        Judgement::Bad => Color::new(0.7, 0.5, 1.0, 1.0),
        Judgement::Miss => Color::new(1.0, 0.3, 0.3, 1.0),
    }
}
