use beatrush::game::{Judgement, ScoreManager};

#[test]
fn test_base_scores() {
    for (judgement, expected) in [
        (Judgement::Perfect, 100),
        (Judgement::Great, 70),
        (Judgement::Good, 30),
        (Judgement::Bad, 10),
        (Judgement::Miss, 0),
    ] {
        let mut score = ScoreManager::new();
        score.apply(judgement);
        assert_eq!(score.total_score, expected);
    }
}

#[test]
fn test_full_combo_run() {
    let mut score = ScoreManager::new();
    for _ in 0..50 {
        score.apply(Judgement::Perfect);
    }

    assert_eq!(score.combo, 50);
    assert_eq!(score.max_combo, 50);
    assert_eq!(score.miss_count, 0);
    assert_eq!(score.accuracy(), 100.0);
    assert_eq!(score.grade(), "S");
}

#[test]
fn test_combo_bonus_accumulates_in_steps() {
    let mut score = ScoreManager::new();
    // 30 perfects: bonus is +0 for notes 1-10, +1 for 11-20, +2 for 21-30.
    for _ in 0..30 {
        score.apply(Judgement::Perfect);
    }
    assert_eq!(score.total_score, 3000 + 10 + 20);
}

#[test]
fn test_miss_breaks_combo_but_keeps_max() {
    let mut score = ScoreManager::new();
    for _ in 0..15 {
        score.apply(Judgement::Perfect);
    }
    score.apply(Judgement::Miss);
    score.apply(Judgement::Perfect);

    assert_eq!(score.combo, 1);
    assert_eq!(score.max_combo, 15);
}

#[test]
fn test_bad_also_breaks_combo() {
    let mut score = ScoreManager::new();
    score.apply(Judgement::Perfect);
    score.apply(Judgement::Bad);
    assert_eq!(score.combo, 0);
}

#[test]
fn test_mixed_accuracy_and_grade() {
    let mut score = ScoreManager::new();
    for _ in 0..8 {
        score.apply(Judgement::Perfect);
    }
    for _ in 0..2 {
        score.apply(Judgement::Great);
    }
    // (800 + 140) / 1000 = 94% -> A
    assert!((score.accuracy() - 94.0).abs() < 0.001);
    assert_eq!(score.grade(), "A");
}
