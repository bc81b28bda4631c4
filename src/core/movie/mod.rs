//! Natural-movie activity analysis.
//!
//! Scores frame-to-frame "activity" of a natural-scene movie as the mean
//! squared luminance difference between temporally adjacent frames, then
//! selects the highest-activity peaks, spaced apart, as representative
//! sub-clip windows.

pub mod activity;
pub mod error;
pub mod frame;
pub mod handler;
pub mod metadata;
pub mod peaks;
pub mod source;
pub mod subclip;

pub use activity::{ActivityConfig, ActivityScorer, ActivitySignal};
pub use error::MovieError;
pub use frame::{Frame, LumaPlane};
pub use handler::MovieAnalyzer;
pub use metadata::MovieMetadata;
pub use peaks::{select_peaks, PeakSelection};
pub use source::{FrameSource, ImageDirSource};
pub use subclip::{FrameDumpWriter, SubclipSpec};
