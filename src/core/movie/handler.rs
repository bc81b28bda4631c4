//! End-to-end movie analysis: score activity, pick sub-clip windows.

use super::activity::{ActivityConfig, ActivityScorer, ActivitySignal};
use super::error::MovieError;
use super::metadata::MovieMetadata;
use super::peaks::select_peaks;
use super::source::FrameSource;
use super::subclip::SubclipSpec;
use log::{debug, info};

/// Drives the scoring and selection passes for one movie.
pub struct MovieAnalyzer {
    metadata: MovieMetadata,
    activity: Option<ActivitySignal>,
}

impl MovieAnalyzer {
    pub fn new(metadata: MovieMetadata) -> Self {
        Self {
            metadata,
            activity: None,
        }
    }

    pub fn metadata(&self) -> &MovieMetadata {
        &self.metadata
    }

    pub fn activity(&self) -> Option<&ActivitySignal> {
        self.activity.as_ref()
    }

    /// Score frame-to-frame activity over `source` in one forward pass.
    ///
    /// When the config gives no end time, the clip duration from metadata is
    /// used; a missing duration is a configuration error and nothing is
    /// scored. Records how the signal was computed back into the metadata.
    pub fn score_activity<S: FrameSource>(
        &mut self,
        source: &mut S,
        config: &ActivityConfig,
    ) -> Result<&ActivitySignal, MovieError> {
        let mut config = config.clone();
        if config.end_time.is_none() {
            let duration = self.metadata.duration;
            if !(duration.is_finite() && duration > 0.0) {
                return Err(MovieError::MissingDuration);
            }
            config.end_time = Some(duration);
        }
        info!("scoring activity in '{}'", self.metadata.title);

        let mut scorer = ActivityScorer::new(self.metadata.frame_rate, config)?;
        while let Some(frame) = source.next_frame()? {
            scorer.push_frame(&frame)?;
            if scorer.is_done() {
                break;
            }
        }
        let signal = scorer.finish();
        info!(
            "✓ {} activity samples at {} Hz",
            signal.values.len(),
            signal.sample_rate
        );

        self.metadata.is_downsampled = signal.decimated;
        self.metadata.is_normalized = signal.normalized;
        Ok(self.activity.insert(signal))
    }

    /// Pick up to `count` sub-clip windows of `clip_len` seconds centered on
    /// the highest-activity peaks.
    ///
    /// With `overlap` unset, peaks are kept at least `clip_len` apart so the
    /// windows cannot share frames. Requires a scored activity signal.
    pub fn select_subclips(
        &self,
        count: usize,
        clip_len: f64,
        overlap: bool,
    ) -> Result<Vec<SubclipSpec>, MovieError> {
        let signal = self
            .activity
            .as_ref()
            .ok_or(MovieError::ActivityNotComputed)?;

        let selection = if overlap {
            select_peaks(&signal.values, count, None, None)?
        } else {
            select_peaks(
                &signal.values,
                count,
                Some(clip_len),
                Some(signal.sample_rate),
            )?
        };

        let specs: Vec<SubclipSpec> = selection
            .indices
            .iter()
            .map(|&index| {
                let center = index as f64 / signal.sample_rate;
                SubclipSpec::centered(center, clip_len, self.metadata.duration)
            })
            .collect();
        debug!("selected {} sub-clip windows", specs.len());
        Ok(specs)
    }
}
