use std::path::Path;

use anyhow::Result;
use rusqlite::{Connection, Row, params};

use crate::game::PlayResult;

/// One persisted play record, keyed by song name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreRecord {
    pub song_name: String,
    pub song_author: String,
    pub total_score: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub great_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub miss_count: u32,
    pub accuracy: f64,
    pub grade: String,
    pub play_count: u32,
    /// Unix timestamp of the best play.
    pub date: i64,
}

impl ScoreRecord {
    pub fn from_result(result: &PlayResult, date: i64) -> Self {
        Self {
            song_name: result.song_name.clone(),
            song_author: result.song_author.clone(),
            total_score: result.total_score,
            max_combo: result.max_combo,
            perfect_count: result.perfect_count,
            great_count: result.great_count,
            good_count: result.good_count,
            bad_count: result.bad_count,
            miss_count: result.miss_count,
            accuracy: result.accuracy(),
            grade: result.grade().to_string(),
            play_count: 1,
            date,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            song_name: row.get("song_name")?,
            song_author: row.get("song_author")?,
            total_score: row.get("total_score")?,
            max_combo: row.get("max_combo")?,
            perfect_count: row.get("perfect")?,
            great_count: row.get("great")?,
            good_count: row.get("good")?,
            bad_count: row.get("bad")?,
            miss_count: row.get("miss")?,
            accuracy: row.get("accuracy")?,
            grade: row.get("grade")?,
            play_count: row.get("playcount")?,
            date: row.get("date")?,
        })
    }
}

/// Score database accessor using SQLite.
pub struct ScoreDatabase {
    conn: Connection,
}

impl ScoreDatabase {
    /// Open or create a score database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA synchronous = OFF; PRAGMA journal_mode = WAL;")?;
        let db = Self { conn };
        db.create_tables()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS score (
                song_name TEXT NOT NULL,
                song_author TEXT NOT NULL DEFAULT '',
                total_score INTEGER NOT NULL DEFAULT 0,
                max_combo INTEGER NOT NULL DEFAULT 0,
                perfect INTEGER NOT NULL DEFAULT 0,
                great INTEGER NOT NULL DEFAULT 0,
                good INTEGER NOT NULL DEFAULT 0,
                bad INTEGER NOT NULL DEFAULT 0,
                miss INTEGER NOT NULL DEFAULT 0,
                accuracy REAL NOT NULL DEFAULT 0,
                grade TEXT NOT NULL DEFAULT '',
                playcount INTEGER NOT NULL DEFAULT 0,
                date INTEGER NOT NULL DEFAULT 0,
                UNIQUE(song_name)
            );",
        )?;
        Ok(())
    }

    /// Get the stored record for a song.
    pub fn get_score(&self, song_name: &str) -> Result<Option<ScoreRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM score WHERE song_name = ?1")?;
        let mut rows = stmt.query_map(params![song_name], ScoreRecord::from_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Record a finished play. The stored score fields keep the best
    /// result; the play count always increments and the timestamp always
    /// moves to the latest play.
    pub fn record_play(&self, result: &PlayResult, date: i64) -> Result<ScoreRecord> {
        let incoming = ScoreRecord::from_result(result, date);
        let merged = match self.get_score(&incoming.song_name)? {
            Some(existing) if existing.total_score >= incoming.total_score => ScoreRecord {
                play_count: existing.play_count + 1,
                max_combo: existing.max_combo.max(incoming.max_combo),
                date: incoming.date,
                ..existing
            },
            Some(existing) => ScoreRecord {
                play_count: existing.play_count + 1,
                max_combo: existing.max_combo.max(incoming.max_combo),
                ..incoming
            },
            None => incoming,
        };
        self.upsert(&merged)?;
        Ok(merged)
    }

    fn upsert(&self, record: &ScoreRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO score
                (song_name, song_author, total_score, max_combo,
                 perfect, great, good, bad, miss, accuracy, grade, playcount, date)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            params![
                record.song_name,
                record.song_author,
                record.total_score,
                record.max_combo,
                record.perfect_count,
                record.great_count,
                record.good_count,
                record.bad_count,
                record.miss_count,
                record.accuracy,
                record.grade,
                record.play_count,
                record.date,
            ],
        )?;
        Ok(())
    }

    /// All records, highest score first.
    pub fn all_scores(&self) -> Result<Vec<ScoreRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM score ORDER BY total_score DESC")?;
        let rows = stmt.query_map([], ScoreRecord::from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn score_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM score", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(song: &str, score: u32, combo: u32) -> PlayResult {
        PlayResult {
            song_name: song.to_string(),
            song_author: "Author".to_string(),
            total_score: score,
            max_combo: combo,
            perfect_count: 10,
            ..Default::default()
        }
    }

    #[test]
    fn record_and_query() {
        let db = ScoreDatabase::open_in_memory().unwrap();
        db.record_play(&make_result("Song A", 1200, 10), 100).unwrap();

        let record = db.get_score("Song A").unwrap().unwrap();
        assert_eq!(record.total_score, 1200);
        assert_eq!(record.play_count, 1);
        assert_eq!(record.grade, "S");
    }

    #[test]
    fn better_play_replaces_score() {
        let db = ScoreDatabase::open_in_memory().unwrap();
        db.record_play(&make_result("Song A", 1000, 8), 100).unwrap();
        db.record_play(&make_result("Song A", 1500, 5), 200).unwrap();

        let record = db.get_score("Song A").unwrap().unwrap();
        assert_eq!(record.total_score, 1500);
        assert_eq!(record.play_count, 2);
        // Max combo keeps the overall best even from the weaker play.
        assert_eq!(record.max_combo, 8);
        assert_eq!(record.date, 200);
    }

    #[test]
    fn worse_play_keeps_best_but_counts_and_redates() {
        let db = ScoreDatabase::open_in_memory().unwrap();
        db.record_play(&make_result("Song A", 1500, 10), 100).unwrap();
        db.record_play(&make_result("Song A", 900, 4), 200).unwrap();

        let record = db.get_score("Song A").unwrap().unwrap();
        assert_eq!(record.total_score, 1500);
        assert_eq!(record.play_count, 2);
        // The timestamp tracks the latest play, not the best one.
        assert_eq!(record.date, 200);
    }

    #[test]
    fn all_scores_ordered_by_score() {
        let db = ScoreDatabase::open_in_memory().unwrap();
        db.record_play(&make_result("Low", 500, 3), 1).unwrap();
        db.record_play(&make_result("High", 2000, 20), 2).unwrap();

        let all = db.all_scores().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].song_name, "High");
    }

    #[test]
    fn missing_song_returns_none() {
        let db = ScoreDatabase::open_in_memory().unwrap();
        assert!(db.get_score("nope").unwrap().is_none());
    }
}
