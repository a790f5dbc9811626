use serde::{Deserialize, Serialize};

/// Number of playable tracks.
pub const TRACK_COUNT: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub metadata: Metadata,
    #[serde(rename = "note")]
    pub notes: Vec<Note>,
}

impl Chart {
    /// Total number of notes in the chart.
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Group notes by track, sorted by timestamp within each track.
    pub fn build_track_notes(&self) -> [Vec<Note>; TRACK_COUNT] {
        let mut grouped: [Vec<Note>; TRACK_COUNT] = Default::default();
        for note in &self.notes {
            grouped[note.track.lane_index()].push(*note);
        }
        for notes in &mut grouped {
            notes.sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));
        }
        grouped
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub song_name: String,
    pub song_author: String,
    /// Song length in ms, serialized as a duration literal ("95s", "1500ms").
    #[serde(with = "duration_literal")]
    pub song_length: f64,
    #[serde(default)]
    pub song_image_path: String,
}

impl Metadata {
    /// File name of the song's audio file under the media directory.
    pub fn audio_file_name(&self) -> String {
        format!("{}.mp3", self.song_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "noteType")]
    pub note_type: NoteType,
    #[serde(rename = "trackType")]
    pub track: TrackId,
    /// Time (ms from chart start) at which the note crosses the judgement line.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
    /// Hold length in ms; 0 for tap notes.
    #[serde(rename = "duration", default)]
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    #[serde(rename = "TAP")]
    Tap,
    #[serde(rename = "HOLD")]
    Hold,
}

/// Playable track, serialized as "0".."3" in chart files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackId {
    #[serde(rename = "0")]
    Left,
    #[serde(rename = "1")]
    MiddleLeft,
    #[serde(rename = "2")]
    MiddleRight,
    #[serde(rename = "3")]
    Right,
}

impl TrackId {
    pub const ALL: [TrackId; TRACK_COUNT] = [
        TrackId::Left,
        TrackId::MiddleLeft,
        TrackId::MiddleRight,
        TrackId::Right,
    ];

    pub fn lane_index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::MiddleLeft => 1,
            Self::MiddleRight => 2,
            Self::Right => 3,
        }
    }

    pub fn from_lane_index(lane: usize) -> Option<Self> {
        Self::ALL.get(lane).copied()
    }
}

/// Serde adapter for duration literals: `<number><unit>` with unit
/// `ms`, `s`, `m`, or `h`. A bare number is taken as ms.
pub mod duration_literal {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn parse_ms(s: &str) -> Option<f64> {
        let s = s.trim();
        let (value, scale) = if let Some(v) = s.strip_suffix("ms") {
            (v, 1.0)
        } else if let Some(v) = s.strip_suffix('s') {
            (v, 1_000.0)
        } else if let Some(v) = s.strip_suffix('m') {
            (v, 60_000.0)
        } else if let Some(v) = s.strip_suffix('h') {
            (v, 3_600_000.0)
        } else {
            (s, 1.0)
        };
        value.trim().parse::<f64>().ok().map(|v| v * scale)
    }

    pub fn serialize<S: Serializer>(ms: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}ms", ms))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_ms(&s).ok_or_else(|| D::Error::custom(format!("invalid duration literal: {s:?}")))
    }
}
