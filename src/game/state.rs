use crate::chart::{Chart, Metadata, Note, TRACK_COUNT, TrackId};

use super::{JudgeWindow, Judgement, PlayResult, ScoreManager, Track, TrackLayout};

/// A note that has spawned and is falling.
#[derive(Debug, Clone, Copy)]
pub struct ActiveNote {
    pub note: Note,
}

/// The play engine: spawns notes as game time passes, resolves key
/// presses against the closest falling note and sweeps notes that fall
/// past the despawn point.
///
/// Time is fed in from outside (the gameplay scene's [`super::GameTimer`])
/// so the engine itself is deterministic and unit-testable.
pub struct GameState {
    metadata: Metadata,
    tracks: [Track; TRACK_COUNT],
    active: [Vec<ActiveNote>; TRACK_COUNT],
    layout: TrackLayout,
    window: JudgeWindow,
    score: ScoreManager,
    elapsed_ms: f64,
    last_judgement: Option<(Judgement, f64)>,
}

impl GameState {
    pub fn new(chart: &Chart, layout: TrackLayout, window: JudgeWindow) -> Self {
        let grouped = chart.build_track_notes();
        let mut iter = grouped.into_iter();
        let tracks = TrackId::ALL.map(|id| Track::new(id, iter.next().unwrap_or_default()));

        Self {
            metadata: chart.metadata.clone(),
            tracks,
            active: Default::default(),
            layout,
            window,
            score: ScoreManager::new(),
            elapsed_ms: 0.0,
            last_judgement: None,
        }
    }

    /// Advance to the given game time: spawn due notes and sweep the ones
    /// that fell past the despawn point.
    pub fn update(&mut self, elapsed_ms: f64) {
        self.elapsed_ms = elapsed_ms;
        self.spawn_due_notes();
        self.sweep_missed_notes();
    }

    fn spawn_due_notes(&mut self) {
        for lane in 0..TRACK_COUNT {
            while let Some(&note) = self.tracks[lane].current() {
                if note.timestamp_ms > self.elapsed_ms {
                    break;
                }
                self.active[lane].push(ActiveNote { note });
                self.tracks[lane].advance();
            }
        }
    }

    fn sweep_missed_notes(&mut self) {
        for lane in 0..TRACK_COUNT {
            // Active notes are ordered by timestamp, so overdue ones sit
            // at the front.
            while let Some(active) = self.active[lane].first() {
                if self.note_y(active) < self.layout.end_y {
                    break;
                }
                let diff = self.layout.time_error_ms(self.note_y(active));
                let judgement = self.window.judge(diff);
                self.score.apply(judgement);
                self.last_judgement = Some((judgement, self.elapsed_ms));
                self.active[lane].remove(0);
            }
        }
    }

    /// Resolve a key press on a track: take the note closest to the
    /// judgement line, and if it has entered the scoring window
    /// (boundary included), consume and judge it. Presses with no
    /// scoreable note are ignored.
    pub fn hit(&mut self, track: TrackId) -> Option<Judgement> {
        let lane = track.lane_index();
        let closest = self.active[lane].first()?;
        let y = self.note_y(closest);
        if y < self.layout.scoring_window_start_y {
            return None;
        }

        let judgement = self.window.judge(self.layout.time_error_ms(y));
        self.score.apply(judgement);
        self.last_judgement = Some((judgement, self.elapsed_ms));
        self.active[lane].remove(0);
        Some(judgement)
    }

    /// Current screen position of an active note.
    pub fn note_y(&self, active: &ActiveNote) -> f32 {
        self.layout.y_at(self.elapsed_ms - active.note.timestamp_ms)
    }

    /// Active notes on a track, closest to the line first.
    pub fn active_notes(&self, track: TrackId) -> &[ActiveNote] {
        &self.active[track.lane_index()]
    }

    /// True once every chart note has spawned and been resolved.
    pub fn notes_exhausted(&self) -> bool {
        self.tracks.iter().all(Track::finished) && self.active.iter().all(Vec::is_empty)
    }

    /// The most recent judgement, if it happened within `within_ms`.
    pub fn recent_judgement(&self, within_ms: f64) -> Option<Judgement> {
        self.last_judgement
            .filter(|(_, at)| self.elapsed_ms - at <= within_ms)
            .map(|(j, _)| j)
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn song_length_ms(&self) -> f64 {
        self.metadata.song_length
    }

    /// Snapshot the play into a result record.
    pub fn result(&self) -> PlayResult {
        PlayResult {
            song_name: self.metadata.song_name.clone(),
            song_author: self.metadata.song_author.clone(),
            total_score: self.score.total_score,
            max_combo: self.score.max_combo,
            perfect_count: self.score.perfect_count,
            great_count: self.score.great_count,
            good_count: self.score.good_count,
            bad_count: self.score.bad_count,
            miss_count: self.score.miss_count,
        }
    }

    /// Rewind everything for a replay of the same chart.
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            track.reset();
        }
        for lane in &mut self.active {
            lane.clear();
        }
        self.score.reset();
        self.elapsed_ms = 0.0;
        self.last_judgement = None;
    }
}
