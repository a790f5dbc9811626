use super::Judgement;

/// Extra score per 10 notes of running combo, capped at 30.
const COMBO_BONUS_INTERVAL: u32 = 10;
const COMBO_BONUS_MAX: u32 = 30;

/// Score and combo tracker for a single play.
#[derive(Debug, Clone, Default)]
pub struct ScoreManager {
    pub total_score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub great_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub miss_count: u32,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one judgement: add base score plus the combo bonus earned by
    /// the combo running *before* this note, then update combo and counts.
    pub fn apply(&mut self, judgement: Judgement) {
        let combo_bonus = (self.combo / COMBO_BONUS_INTERVAL).min(COMBO_BONUS_MAX);
        self.total_score += judgement.base_score() + combo_bonus;

        if judgement.breaks_combo() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        }

        match judgement {
            Judgement::Perfect => self.perfect_count += 1,
            Judgement::Great => self.great_count += 1,
            Judgement::Good => self.good_count += 1,
            Judgement::Bad => self.bad_count += 1,
            Judgement::Miss => self.miss_count += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total number of judged notes.
    pub fn total_judged(&self) -> u32 {
        self.perfect_count + self.great_count + self.good_count + self.bad_count + self.miss_count
    }

    /// Accuracy percentage (0-100); 100 when nothing has been judged yet.
    pub fn accuracy(&self) -> f64 {
        let total = self.total_judged();
        if total == 0 {
            return 100.0;
        }
        let weighted = self.perfect_count * 100
            + self.great_count * 70
            + self.good_count * 30
            + self.bad_count * 10;
        weighted as f64 / (total * 100) as f64 * 100.0
    }

    /// Letter grade for the current accuracy.
    pub fn grade(&self) -> &'static str {
        grade_for_accuracy(self.accuracy())
    }
}

pub(crate) fn grade_for_accuracy(accuracy: f64) -> &'static str {
    if accuracy >= 95.0 {
        "S"
    } else if accuracy >= 90.0 {
        "A"
    } else if accuracy >= 80.0 {
        "B"
    } else if accuracy >= 70.0 {
        "C"
    } else {
        "D"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let score = ScoreManager::new();
        assert_eq!(score.total_score, 0);
        assert_eq!(score.combo, 0);
        assert_eq!(score.accuracy(), 100.0);
        assert_eq!(score.grade(), "S");
    }

    #[test]
    fn test_combo_continues_and_breaks() {
        let mut score = ScoreManager::new();
        score.apply(Judgement::Perfect);
        score.apply(Judgement::Great);
        score.apply(Judgement::Good);
        assert_eq!(score.combo, 3);
        score.apply(Judgement::Bad);
        assert_eq!(score.combo, 0);
        assert_eq!(score.max_combo, 3);
    }

    #[test]
    fn test_combo_bonus_kicks_in_at_ten() {
        let mut score = ScoreManager::new();
        for _ in 0..10 {
            score.apply(Judgement::Perfect);
        }
        assert_eq!(score.total_score, 1000);

        // The 11th note carries a +1 bonus from the 10-combo.
        score.apply(Judgement::Perfect);
        assert_eq!(score.total_score, 1101);
    }

    #[test]
    fn test_combo_bonus_caps_at_thirty() {
        let mut score = ScoreManager::new();
        for _ in 0..400 {
            score.apply(Judgement::Perfect);
        }
        let before = score.total_score;
        score.apply(Judgement::Perfect);
        assert_eq!(score.total_score, before + 100 + 30);
    }

    #[test]
    fn test_bonus_applies_before_combo_reset() {
        // A Miss still collects the bonus earned by the running combo,
        // then resets it.
        let mut score = ScoreManager::new();
        for _ in 0..20 {
            score.apply(Judgement::Perfect);
        }
        let before = score.total_score;
        score.apply(Judgement::Miss);
        assert_eq!(score.total_score, before + 2);
        assert_eq!(score.combo, 0);
    }

    #[test]
    fn test_accuracy_weighting() {
        let mut score = ScoreManager::new();
        score.apply(Judgement::Perfect);
        score.apply(Judgement::Great);
        score.apply(Judgement::Good);
        score.apply(Judgement::Bad);
        score.apply(Judgement::Miss);
        // (100 + 70 + 30 + 10 + 0) / 500
        assert!((score.accuracy() - 42.0).abs() < 0.001);
        assert_eq!(score.grade(), "D");
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(grade_for_accuracy(95.0), "S");
        assert_eq!(grade_for_accuracy(94.9), "A");
        assert_eq!(grade_for_accuracy(90.0), "A");
        assert_eq!(grade_for_accuracy(80.0), "B");
        assert_eq!(grade_for_accuracy(70.0), "C");
        assert_eq!(grade_for_accuracy(69.9), "D");
    }

    #[test]
    fn test_reset() {
        let mut score = ScoreManager::new();
        score.apply(Judgement::Perfect);
        score.reset();
        assert_eq!(score.total_score, 0);
        assert_eq!(score.total_judged(), 0);
    }
}
