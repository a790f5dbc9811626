/// Judgement level for a single note hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Judgement {
    Perfect,
    Great,
    Good,
    Bad,
    Miss,
}

impl Judgement {
    /// Base score awarded for this level.
    pub fn base_score(self) -> u32 {
        match self {
            Self::Perfect => 100,
            Self::Great => 70,
            Self::Good => 30,
            Self::Bad => 10,
            Self::Miss => 0,
        }
    }

    /// Returns true if this level resets the combo.
    pub fn breaks_combo(self) -> bool {
        matches!(self, Self::Bad | Self::Miss)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::Miss => "Miss",
        }
    }
}

/// One asymmetric timing window: inclusive early/late bounds in ms.
/// Negative = hit before the note reached the line.
#[derive(Debug, Clone, Copy)]
struct Window {
    early_ms: f64,
    late_ms: f64,
}

impl Window {
    fn contains(&self, diff_ms: f64) -> bool {
        diff_ms >= self.early_ms && diff_ms <= self.late_ms
    }
}

/// Judgement timing windows.
///
/// Players react differently to early and late hits, so the windows are
/// asymmetric: the early side is roughly twice as forgiving.
#[derive(Debug, Clone, Copy)]
pub struct JudgeWindow {
    perfect: Window,
    great: Window,
    good: Window,
    bad: Window,
}

impl JudgeWindow {
    /// The standard BeatRush windows.
    pub fn standard() -> Self {
        Self {
            perfect: Window {
                early_ms: -70.0,
                late_ms: 70.0,
            },
            great: Window {
                early_ms: -200.0,
                late_ms: 150.0,
            },
            good: Window {
                early_ms: -400.0,
                late_ms: 200.0,
            },
            bad: Window {
                early_ms: -800.0,
                late_ms: 300.0,
            },
        }
    }

    /// Grade a hit by its timing error. Outside every window is a Miss.
    pub fn judge(&self, diff_ms: f64) -> Judgement {
        if self.perfect.contains(diff_ms) {
            Judgement::Perfect
        } else if self.great.contains(diff_ms) {
            Judgement::Great
        } else if self.good.contains(diff_ms) {
            Judgement::Good
        } else if self.bad.contains(diff_ms) {
            Judgement::Bad
        } else {
            Judgement::Miss
        }
    }

    /// Earliest scoreable error; a press may only consume a note at or
    /// past this point.
    pub fn earliest_ms(&self) -> f64 {
        self.bad.early_ms
    }

    /// Returns true once a note is too late to be anything but a Miss.
    pub fn is_missed(&self, diff_ms: f64) -> bool {
        diff_ms > self.bad.late_ms
    }
}

impl Default for JudgeWindow {
    fn default() -> Self {
        Self::standard()
    }
}
