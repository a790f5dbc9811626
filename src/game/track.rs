use crate::chart::{Note, TrackId};

/// Cursor over one track's notes, ordered by timestamp.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    notes: Vec<Note>,
    next: usize,
}

impl Track {
    pub fn new(id: TrackId, notes: Vec<Note>) -> Self {
        Self { id, notes, next: 0 }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    /// The next note that has not yet spawned, if any.
    pub fn current(&self) -> Option<&Note> {
        self.notes.get(self.next)
    }

    pub fn advance(&mut self) {
        if self.next < self.notes.len() {
            self.next += 1;
        }
    }

    pub fn finished(&self) -> bool {
        self.next >= self.notes.len()
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
}

/// Vertical geometry of a track viewport.
///
/// Notes spawn above the visible area, fall at a constant speed, cross the
/// judgement line near the bottom and despawn below the screen. All Y
/// values grow downward.
#[derive(Debug, Clone, Copy)]
pub struct TrackLayout {
    pub top_y: f32,
    pub bottom_y: f32,
    /// Spawn position, above the viewport.
    pub start_y: f32,
    /// Despawn position, below the viewport.
    pub end_y: f32,
    pub judgement_line_y: f32,
    /// Earliest position at which a press may consume a note.
    pub scoring_window_start_y: f32,
    /// Fall speed in px per ms.
    pub fall_per_ms: f32,
}

impl TrackLayout {
    /// Spawn headroom above the viewport top.
    pub const BEFORE_TOP_Y: f32 = 500.0;
    /// Despawn margin below the viewport bottom.
    pub const AFTER_BOTTOM_Y: f32 = 100.0;
    /// Judgement line height above the viewport bottom.
    pub const BEFORE_BOTTOM_Y: f32 = 100.0;

    /// Build the layout for a viewport spanning `top_y..bottom_y`.
    ///
    /// `earliest_scoreable_ms` is the early bound of the widest judgement
    /// window (negative); it fixes where the scoring window opens above
    /// the judgement line.
    pub fn new(top_y: f32, bottom_y: f32, fall_speed_px_s: f32, earliest_scoreable_ms: f64) -> Self {
        let fall_per_ms = fall_speed_px_s / 1000.0;
        let judgement_line_y = bottom_y - Self::BEFORE_BOTTOM_Y;
        Self {
            top_y,
            bottom_y,
            start_y: top_y - Self::BEFORE_TOP_Y,
            end_y: bottom_y + Self::AFTER_BOTTOM_Y,
            judgement_line_y,
            scoring_window_start_y: judgement_line_y + fall_per_ms * earliest_scoreable_ms as f32,
            fall_per_ms,
        }
    }

    /// Travel time from spawn to the judgement line. The song is started
    /// this long (minus the configured correction) after gameplay begins.
    pub fn fall_delay_ms(&self) -> f64 {
        ((self.judgement_line_y - self.start_y) / self.fall_per_ms) as f64
    }

    /// Note position after `ms_since_spawn` ms of falling.
    pub fn y_at(&self, ms_since_spawn: f64) -> f32 {
        self.start_y + self.fall_per_ms * ms_since_spawn as f32
    }

    /// Timing error of a note at position `y`:
    /// negative = above the line (early), positive = past it (late).
    pub fn time_error_ms(&self, y: f32) -> f64 {
        ((y - self.judgement_line_y) / self.fall_per_ms) as f64
    }
}
