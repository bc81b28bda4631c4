//! Photodiode stimulus-frame timing.
//!
//! A photodiode taped to the stimulus monitor records a flash for every
//! stimulus frame, multiplexed into the same acquisition files as the neural
//! channels. This module stitches the per-file sample chunks into one
//! continuous timeline and extracts the time of each flash as the local
//! maximum of a threshold-crossing run.

pub mod error;
pub mod export;
pub mod extractor;
pub mod source;

pub use error::PhotodiodeError;
pub use export::{write_events_csv, write_timestamps_txt};
pub use extractor::{DetectedEvent, ExtractorConfig, ThresholdRunExtractor};
pub use source::{BinChunkSource, ChunkSource};
