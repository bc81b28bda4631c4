//! Frame-to-frame activity scoring.

use super::error::MovieError;
use super::frame::{Frame, LumaPlane};

/// Parameters for one activity-scoring pass.
#[derive(Debug, Clone)]
pub struct ActivityConfig {
    /// Seconds into the clip at which scoring starts.
    pub start_time: f64,
    /// Seconds at which scoring stops; `None` runs to the end of the stream.
    pub end_time: Option<f64>,
    /// Compare roughly one frame per second instead of every frame.
    pub decimate: bool,
    /// Subtract each frame's mean luminance before comparison.
    pub normalize: bool,
    /// Moving-sum smoothing window in seconds, if any.
    pub smooth: Option<f64>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: None,
            decimate: true,
            normalize: true,
            smooth: Some(15.0 * 60.0),
        }
    }
}

/// Activity signal: one score per retained frame pair, indexed by output
/// position rather than raw video frame index.
#[derive(Debug, Clone)]
pub struct ActivitySignal {
    pub values: Vec<f64>,
    /// Samples per second of `values`: 1 Hz when decimated, the frame rate
    /// otherwise.
    pub sample_rate: f64,
    pub decimated: bool,
    pub normalized: bool,
}

/// Streaming scorer.
///
/// Holds at most the previous retained frame's luminance plane; full frames
/// are never retained, so memory stays O(1) in the number of frames.
pub struct ActivityScorer {
    config: ActivityConfig,
    frame_rate: f64,
    stride: u64,
    raw_index: u64,
    done: bool,
    prev: Option<LumaPlane>,
    values: Vec<f64>,
}

impl ActivityScorer {
    pub fn new(frame_rate: f64, config: ActivityConfig) -> Result<Self, MovieError> {
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(MovieError::InvalidFrameRate(frame_rate));
        }
        let stride = frame_rate.ceil() as u64;
        Ok(Self {
            config,
            frame_rate,
            stride,
            raw_index: 0,
            done: false,
            prev: None,
            values: Vec::new(),
        })
    }

    /// True once a frame past `end_time` has been seen; callers can stop
    /// decoding early.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed the next raw frame.
    ///
    /// Returns the score recorded for this frame, if the frame was retained
    /// and had a predecessor to compare against. The first retained frame
    /// produces no score.
    pub fn push_frame(&mut self, frame: &Frame) -> Result<Option<f64>, MovieError> {
        let index = self.raw_index;
        self.raw_index += 1;
        let time = index as f64 / self.frame_rate;

        if time < self.config.start_time {
            return Ok(None);
        }
        if let Some(end) = self.config.end_time {
            if time > end {
                self.done = true;
                return Ok(None);
            }
        }
        if self.config.decimate && index % self.stride != 0 {
            return Ok(None);
        }

        let mut luma = frame.luminance();
        if self.config.normalize {
            luma.subtract_mean();
        }
        if let Some(prev) = &self.prev {
            if prev.width != luma.width || prev.height != luma.height {
                return Err(MovieError::FrameSizeMismatch {
                    expected_width: prev.width,
                    expected_height: prev.height,
                    width: luma.width,
                    height: luma.height,
                });
            }
        }

        let score = self.prev.take().map(|prev| {
            let score = prev.mean_sq_diff(&luma);
            self.values.push(score);
            score
        });
        self.prev = Some(luma);
        Ok(score)
    }

    /// Consume the scorer, applying smoothing if configured.
    pub fn finish(self) -> ActivitySignal {
        let sample_rate = if self.config.decimate {
            1.0
        } else {
            self.frame_rate
        };
        let values = match self.config.smooth {
            Some(window) if window > 0.0 => {
                let width = (window * sample_rate).round().max(1.0) as usize;
                box_smooth_same(&self.values, width)
            }
            _ => self.values,
        };
        ActivitySignal {
            values,
            sample_rate,
            decimated: self.config.decimate,
            normalized: self.config.normalize,
        }
    }
}

/// "Same"-length moving-sum filter: each output sample is the sum of the
/// input over a window of `width` samples centered on it, windows shrinking
/// past the signal's edges. Output length equals input length.
pub fn box_smooth_same(signal: &[f64], width: usize) -> Vec<f64> {
    let n = signal.len();
    if n == 0 || width <= 1 {
        return signal.to_vec();
    }
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &v in signal {
        acc += v;
        prefix.push(acc);
    }
    let left = (width - 1) / 2;
    (0..n)
        .map(|i| {
            let k = i + left;
            let lo = k.saturating_sub(width - 1);
            let hi = k.min(n - 1);
            prefix[hi + 1] - prefix[lo]
        })
        .collect()
}
