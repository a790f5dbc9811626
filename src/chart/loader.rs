use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;
use walkdir::WalkDir;

use super::{Chart, ChartError, Metadata};

/// A chart discovered by a directory scan.
#[derive(Debug, Clone)]
pub struct SongEntry {
    pub chart_path: PathBuf,
    pub metadata: Metadata,
}

/// Loads chart files and scans chart directories.
pub struct ChartLoader;

impl ChartLoader {
    /// Load a full chart (metadata + notes) from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Chart, ChartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ChartError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ChartError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load only the metadata section of a chart file.
    ///
    /// The note array is skipped during deserialization, so this stays cheap
    /// for the song-select listing even with large charts.
    pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<Metadata, ChartError> {
        #[derive(Deserialize)]
        struct MetadataOnly {
            metadata: Metadata,
        }

        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ChartError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: MetadataOnly =
            serde_json::from_str(&content).map_err(|source| ChartError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(parsed.metadata)
    }

    /// Scan a directory for chart files and return their metadata,
    /// sorted by song name. Unreadable files are skipped with a warning.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Vec<SongEntry>, ChartError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ChartError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut songs = Vec::new();
        for entry in WalkDir::new(dir)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match Self::load_metadata(path) {
                Ok(metadata) => songs.push(SongEntry {
                    chart_path: path.to_path_buf(),
                    metadata,
                }),
                Err(e) => warn!("Skipping chart {}: {e}", path.display()),
            }
        }

        songs.sort_by(|a, b| a.metadata.song_name.cmp(&b.metadata.song_name));
        Ok(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_JSON: &str = r#"{
        "metadata": {
            "songName": "Restriction",
            "songAuthor": "Example Artist",
            "songLength": "95s",
            "songImagePath": "/image/poster/restriction.jpg"
        },
        "note": [
            { "noteType": "TAP", "trackType": "1", "timestamp": 1250.0, "duration": 0.0 },
            { "noteType": "HOLD", "trackType": "3", "timestamp": 2500.0, "duration": 600.0 }
        ]
    }"#;

    fn write_chart(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_chart(dir.path(), "Restriction.json", CHART_JSON);

        let chart = ChartLoader::load(&path).unwrap();
        assert_eq!(chart.metadata.song_name, "Restriction");
        assert_eq!(chart.metadata.song_author, "Example Artist");
        assert!((chart.metadata.song_length - 95_000.0).abs() < 0.001);
        assert_eq!(chart.note_count(), 2);
    }

    #[test]
    fn test_load_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_chart(dir.path(), "Restriction.json", CHART_JSON);

        let metadata = ChartLoader::load_metadata(&path).unwrap();
        assert_eq!(metadata.song_name, "Restriction");
        assert_eq!(metadata.audio_file_name(), "Restriction.mp3");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ChartLoader::load("does/not/exist.json");
        assert!(matches!(result, Err(ChartError::FileRead { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_chart(dir.path(), "bad.json", "{ not json");

        let result = ChartLoader::load(&path);
        assert!(matches!(result, Err(ChartError::Parse { .. })));
    }

    #[test]
    fn test_empty_note_array_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_chart(
            dir.path(),
            "empty.json",
            r#"{
                "metadata": {
                    "songName": "Empty",
                    "songAuthor": "Nobody",
                    "songLength": "10s"
                },
                "note": []
            }"#,
        );

        let chart = ChartLoader::load(&path).unwrap();
        assert_eq!(chart.note_count(), 0);
    }

    #[test]
    fn test_scan_skips_unreadable_charts() {
        let dir = tempfile::tempdir().unwrap();
        write_chart(dir.path(), "Restriction.json", CHART_JSON);
        write_chart(dir.path(), "broken.json", "nope");
        write_chart(dir.path(), "ignored.txt", "not a chart");

        let songs = ChartLoader::scan(dir.path()).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].metadata.song_name, "Restriction");
    }

    #[test]
    fn test_scan_missing_directory() {
        let result = ChartLoader::scan("does/not/exist");
        assert!(matches!(result, Err(ChartError::DirectoryNotFound(_))));
    }
}
