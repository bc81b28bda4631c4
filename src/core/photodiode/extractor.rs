//! Threshold-crossing run detection over chunked recordings.

use super::error::PhotodiodeError;
use super::source::ChunkSource;
use log::{debug, info};
use serde::Serialize;

/// Detection parameters for one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Samples strictly above this value belong to a stimulus flash.
    pub threshold: f64,
    /// Acquisition rate of the photodiode channel in Hz.
    pub sampling_rate: f64,
}

/// One local-maximum peak inside a threshold-crossing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedEvent {
    pub global_index: u64,
    /// Seconds since the start of the first chunk: `global_index / sampling_rate`.
    pub timestamp: f64,
    pub value: f64,
    pub source_chunk: String,
}

/// Chunk-at-a-time peak extractor.
///
/// Chunks are stitched into one continuous timeline by a cumulative sample
/// offset; the extractor never holds more than the chunk it is given.
/// `reset()` returns the offset to zero for a new recording.
pub struct ThresholdRunExtractor {
    config: ExtractorConfig,
    cumulative_samples: u64,
}

impl ThresholdRunExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, PhotodiodeError> {
        if !(config.sampling_rate.is_finite() && config.sampling_rate > 0.0) {
            return Err(PhotodiodeError::InvalidSamplingRate(config.sampling_rate));
        }
        Ok(Self {
            config,
            cumulative_samples: 0,
        })
    }

    /// Detect all run peaks in one chunk and advance the timeline.
    ///
    /// The offset advances by the full chunk length even when no sample
    /// qualifies, so indices stay continuous across quiet chunks.
    pub fn process_chunk(&mut self, chunk_id: &str, samples: &[f64]) -> Vec<DetectedEvent> {
        let mut events = Vec::new();
        for (start, end) in threshold_runs(samples, self.config.threshold) {
            let peak = run_peak(samples, start, end);
            let global_index = self.cumulative_samples + peak as u64;
            events.push(DetectedEvent {
                global_index,
                timestamp: global_index as f64 / self.config.sampling_rate,
                value: samples[peak],
                source_chunk: chunk_id.to_string(),
            });
        }
        debug!(
            "chunk '{}': {} samples, {} flash events",
            chunk_id,
            samples.len(),
            events.len()
        );
        self.cumulative_samples += samples.len() as u64;
        events
    }

    /// Run the extractor over every chunk id, in the order given.
    ///
    /// Chunks are read and released one at a time.
    pub fn extract_all<S: ChunkSource>(
        &mut self,
        source: &mut S,
        chunk_ids: &[String],
    ) -> Result<Vec<DetectedEvent>, PhotodiodeError> {
        let mut all = Vec::new();
        for id in chunk_ids {
            let samples = source.read_chunk(id)?;
            all.extend(self.process_chunk(id, &samples));
        }
        info!(
            "✓ {} flash events across {} chunks ({} samples)",
            all.len(),
            chunk_ids.len(),
            self.cumulative_samples
        );
        Ok(all)
    }

    /// Total samples consumed so far, across all chunks.
    pub fn samples_seen(&self) -> u64 {
        self.cumulative_samples
    }

    pub fn reset(&mut self) {
        self.cumulative_samples = 0;
    }
}

/// Maximal runs of consecutive indices whose sample strictly exceeds
/// `threshold`, as inclusive `(start, end)` pairs.
fn threshold_runs(samples: &[f64], threshold: f64) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for (i, &v) in samples.iter().enumerate() {
        if v > threshold {
            current = match current {
                Some((start, _)) => Some((start, i)),
                None => Some((i, i)),
            };
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}

/// Index of the largest sample within the inclusive run `[start, end]`.
///
/// The scan covers the whole run including its final sample; ties resolve to
/// the earliest index.
fn run_peak(samples: &[f64], start: usize, end: usize) -> usize {
    let mut peak = start;
    for i in start + 1..=end {
        if samples[i] > samples[peak] {
            peak = i;
        }
    }
    peak
}
