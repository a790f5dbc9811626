//! End-to-end play simulation through the engine, driven by a mock clock.

use beatrush::chart::{Chart, Metadata, Note, NoteType, TrackId};
use beatrush::database::ScoreDatabase;
use beatrush::game::{GameState, JudgeWindow, Judgement, TrackLayout};

fn tap(track: TrackId, ts: f64) -> Note {
    Note {
        note_type: NoteType::Tap,
        track,
        timestamp_ms: ts,
        duration_ms: 0.0,
    }
}

fn test_chart() -> Chart {
    Chart {
        metadata: Metadata {
            song_name: "Integration".into(),
            song_author: "Tester".into(),
            song_length: 5_000.0,
            song_image_path: String::new(),
        },
        notes: vec![
            tap(TrackId::Left, 500.0),
            tap(TrackId::MiddleLeft, 1000.0),
            tap(TrackId::MiddleRight, 1500.0),
            tap(TrackId::Right, 2000.0),
        ],
    }
}

fn new_state() -> GameState {
    let window = JudgeWindow::standard();
    let layout = TrackLayout::new(0.0, 720.0, 600.0, window.earliest_ms());
    GameState::new(&test_chart(), layout, window)
}

#[test]
fn test_perfect_play_start_to_finish() {
    let mut state = new_state();
    let delay = state.layout().fall_delay_ms();

    for note in test_chart().notes {
        // Step to the exact moment the note crosses the line.
        state.update(note.timestamp_ms + delay);
        assert_eq!(state.hit(note.track), Some(Judgement::Perfect));
    }

    assert!(state.notes_exhausted());
    let result = state.result();
    assert_eq!(result.perfect_count, 4);
    assert_eq!(result.max_combo, 4);
    assert_eq!(result.total_score, 400);
    assert_eq!(result.grade(), "S");
    assert_eq!(result.accuracy(), 100.0);
}

#[test]
fn test_sloppy_play_mixes_judgements() {
    let mut state = new_state();
    let delay = state.layout().fall_delay_ms();

    // 30 ms late: Perfect.
    state.update(500.0 + delay + 30.0);
    assert_eq!(state.hit(TrackId::Left), Some(Judgement::Perfect));

    // 100 ms early: Great.
    state.update(1000.0 + delay - 100.0);
    assert_eq!(state.hit(TrackId::MiddleLeft), Some(Judgement::Great));

    // 180 ms late: Good.
    state.update(1500.0 + delay + 180.0);
    assert_eq!(state.hit(TrackId::MiddleRight), Some(Judgement::Good));

    // Never pressed: swept as a Miss once it falls past the despawn line.
    state.update(2000.0 + delay + 400.0);
    assert!(state.notes_exhausted());

    let result = state.result();
    assert_eq!(result.perfect_count, 1);
    assert_eq!(result.great_count, 1);
    assert_eq!(result.good_count, 1);
    assert_eq!(result.miss_count, 1);
    // (100 + 70 + 30 + 0) / 400 = 50%
    assert!((result.accuracy() - 50.0).abs() < 0.001);
    assert_eq!(result.grade(), "D");
}

#[test]
fn test_replay_after_reset_scores_fresh() {
    let mut state = new_state();
    let delay = state.layout().fall_delay_ms();

    state.update(500.0 + delay);
    state.hit(TrackId::Left);
    assert_eq!(state.score().total_judged(), 1);

    state.reset();
    assert_eq!(state.score().total_judged(), 0);

    state.update(500.0 + delay);
    assert_eq!(state.hit(TrackId::Left), Some(Judgement::Perfect));
}

#[test]
fn test_result_persists_and_merges_in_database() {
    let mut state = new_state();
    let delay = state.layout().fall_delay_ms();
    let db = ScoreDatabase::open_in_memory().unwrap();

    // First run: all perfect.
    for note in test_chart().notes {
        state.update(note.timestamp_ms + delay);
        state.hit(note.track);
    }
    db.record_play(&state.result(), 1_000).unwrap();

    // Second run: let everything drop.
    state.reset();
    state.update(10_000.0 + delay);
    assert!(state.notes_exhausted());
    db.record_play(&state.result(), 2_000).unwrap();

    let record = db.get_score("Integration").unwrap().unwrap();
    assert_eq!(record.total_score, 400);
    assert_eq!(record.play_count, 2);
    assert_eq!(record.grade, "S");
    // Last-played timestamp follows the newest play even when the best
    // score is older.
    assert_eq!(record.date, 2_000);
}
