//! Chunked access to raw acquisition files.

use super::error::PhotodiodeError;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Sequential access to the sample chunks of one recording.
///
/// Callers fix the chunk order; implementations never need random access and
/// each chunk is read at most once.
pub trait ChunkSource {
    fn read_chunk(&mut self, id: &str) -> Result<Vec<f64>, PhotodiodeError>;
}

/// Reads `<data_dir>/<id>.bin` files of little-endian interleaved i16 frames
/// and selects a single channel, scaled to volts.
pub struct BinChunkSource {
    data_dir: PathBuf,
    channel_count: usize,
    channel: usize,
    volts_per_count: f64,
}

impl BinChunkSource {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        channel_count: usize,
        channel: usize,
        volts_per_count: f64,
    ) -> Result<Self, PhotodiodeError> {
        if channel >= channel_count {
            return Err(PhotodiodeError::ChannelOutOfRange {
                channel,
                channel_count,
            });
        }
        Ok(Self {
            data_dir: data_dir.into(),
            channel_count,
            channel,
            volts_per_count,
        })
    }

    fn decode(&self, id: &str, bytes: &[u8]) -> Result<Vec<f64>, PhotodiodeError> {
        let frame_bytes = 2 * self.channel_count;
        if bytes.len() % frame_bytes != 0 {
            return Err(PhotodiodeError::MalformedChunk {
                id: id.to_string(),
                byte_len: bytes.len(),
                channel_count: self.channel_count,
            });
        }
        let offset = 2 * self.channel;
        let samples = bytes
            .chunks_exact(frame_bytes)
            .map(|frame| {
                let raw = i16::from_le_bytes([frame[offset], frame[offset + 1]]);
                raw as f64 * self.volts_per_count
            })
            .collect();
        Ok(samples)
    }
}

impl ChunkSource for BinChunkSource {
    fn read_chunk(&mut self, id: &str) -> Result<Vec<f64>, PhotodiodeError> {
        let path = self.data_dir.join(format!("{id}.bin"));
        debug!("reading chunk {:?}", path);
        let bytes = fs::read(&path)?;
        self.decode(id, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(channel_count: usize, channel: usize) -> BinChunkSource {
        BinChunkSource::new(".", channel_count, channel, 0.5).unwrap()
    }

    fn le_frames(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_selects_channel_and_scales() {
        // Two 2-channel frames: (10, -4) and (6, 8).
        let bytes = le_frames(&[10, -4, 6, 8]);

        let samples = source(2, 0).decode("a", &bytes).unwrap();
        assert_eq!(samples, vec![5.0, 3.0]);

        let samples = source(2, 1).decode("a", &bytes).unwrap();
        assert_eq!(samples, vec![-2.0, 4.0]);
    }

    #[test]
    fn test_decode_rejects_partial_frame() {
        let mut bytes = le_frames(&[10, -4]);
        bytes.push(0xff);

        let result = source(2, 0).decode("a", &bytes);
        assert!(matches!(
            result,
            Err(PhotodiodeError::MalformedChunk { byte_len: 5, .. })
        ));
    }

    #[test]
    fn test_channel_out_of_range() {
        let result = BinChunkSource::new(".", 2, 2, 1.0);
        assert!(matches!(
            result,
            Err(PhotodiodeError::ChannelOutOfRange {
                channel: 2,
                channel_count: 2
            })
        ));
    }
}
