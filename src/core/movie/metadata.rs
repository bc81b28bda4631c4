//! Clip-level metadata.

use super::error::MovieError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// What a movie is and how its activity signal was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub title: String,
    pub frame_rate: f64,
    /// Total clip duration in seconds.
    pub duration: f64,
    /// (width, height) of decoded frames.
    pub frame_size: (u32, u32),
    /// True when the activity signal was computed at one frame per second.
    pub is_downsampled: bool,
    /// True when frames were mean-normalized before comparison.
    pub is_normalized: bool,
}

impl MovieMetadata {
    pub fn new(title: impl Into<String>, frame_rate: f64, duration: f64, frame_size: (u32, u32)) -> Self {
        Self {
            title: title.into(),
            frame_rate,
            duration,
            frame_size,
            is_downsampled: false,
            is_normalized: false,
        }
    }

    /// Persist as a JSON sidecar next to analysis outputs.
    pub fn save_json(&self, path: &Path) -> Result<(), MovieError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self, MovieError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut meta = MovieMetadata::new("catcam.mp4", 30.0, 3600.0, (640, 480));
        meta.is_downsampled = true;

        let json = serde_json::to_string(&meta).unwrap();
        let back: MovieMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
