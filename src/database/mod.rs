mod score_db;

pub use score_db::{ScoreDatabase, ScoreRecord};
