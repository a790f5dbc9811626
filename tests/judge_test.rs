use beatrush::game::{JudgeWindow, Judgement};

#[test]
fn test_perfect_window() {
    let window = JudgeWindow::standard();

    assert_eq!(window.judge(0.0), Judgement::Perfect);
    assert_eq!(window.judge(70.0), Judgement::Perfect);
    assert_eq!(window.judge(-70.0), Judgement::Perfect);
}

#[test]
fn test_great_window() {
    let window = JudgeWindow::standard();

    assert_eq!(window.judge(71.0), Judgement::Great);
    assert_eq!(window.judge(150.0), Judgement::Great);
    assert_eq!(window.judge(-71.0), Judgement::Great);
    assert_eq!(window.judge(-200.0), Judgement::Great);
}

#[test]
fn test_good_window() {
    let window = JudgeWindow::standard();

    assert_eq!(window.judge(151.0), Judgement::Good);
    assert_eq!(window.judge(200.0), Judgement::Good);
    assert_eq!(window.judge(-201.0), Judgement::Good);
    assert_eq!(window.judge(-400.0), Judgement::Good);
}

#[test]
fn test_bad_window() {
    let window = JudgeWindow::standard();

    assert_eq!(window.judge(201.0), Judgement::Bad);
    assert_eq!(window.judge(300.0), Judgement::Bad);
    assert_eq!(window.judge(-401.0), Judgement::Bad);
    assert_eq!(window.judge(-800.0), Judgement::Bad);
}

#[test]
fn test_early_side_is_wider() {
    let window = JudgeWindow::standard();

    // 250 ms early is still Good, 250 ms late is already Bad.
    assert_eq!(window.judge(-250.0), Judgement::Good);
    assert_eq!(window.judge(250.0), Judgement::Bad);
}

#[test]
fn test_outside_every_window_is_miss() {
    let window = JudgeWindow::standard();

    assert_eq!(window.judge(301.0), Judgement::Miss);
    assert_eq!(window.judge(-801.0), Judgement::Miss);
    assert_eq!(window.judge(5000.0), Judgement::Miss);
}

#[test]
fn test_is_missed_only_past_the_late_bound() {
    let window = JudgeWindow::standard();

    assert!(!window.is_missed(0.0));
    assert!(!window.is_missed(300.0));
    assert!(window.is_missed(301.0));
    // Early errors are never a locked-in miss.
    assert!(!window.is_missed(-801.0));
}

#[test]
fn test_earliest_scoreable_bound() {
    let window = JudgeWindow::standard();
    assert_eq!(window.earliest_ms(), -800.0);
}
