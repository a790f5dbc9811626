use super::score::grade_for_accuracy;

/// Snapshot of a finished (or aborted) play.
#[derive(Debug, Clone, Default)]
pub struct PlayResult {
    pub song_name: String,
    pub song_author: String,
    pub total_score: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub great_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub miss_count: u32,
}

impl PlayResult {
    pub fn total_judged(&self) -> u32 {
        self.perfect_count + self.great_count + self.good_count + self.bad_count + self.miss_count
    }

    /// Accuracy percentage (0-100).
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

    pub fn grade(&self) -> &'static str {
        grade_for_accuracy(self.accuracy())
    }
}
