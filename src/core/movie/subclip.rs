//! Sub-clip windows and frame-dump export.

use super::error::MovieError;
use super::frame::Frame;
use super::source::FrameSource;
use image::{ImageOutputFormat, RgbImage};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// One selected sub-clip window, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubclipSpec {
    pub center_time: f64,
    pub start: f64,
    pub end: f64,
}

impl SubclipSpec {
    /// Window of `length` seconds centered on `center`, clamped to
    /// `[0, duration]`.
    pub fn centered(center: f64, length: f64, duration: f64) -> Self {
        Self {
            center_time: center,
            start: (center - length / 2.0).max(0.0),
            end: (center + length / 2.0).min(duration),
        }
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Writes each sub-clip's frames as JPEG dumps under per-clip directories.
///
/// A playable-media encoder lives outside this crate; the frame dump is the
/// durable record of the selected window.
pub struct FrameDumpWriter {
    out_dir: PathBuf,
    jpeg_quality: u8,
}

impl FrameDumpWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::with_quality(out_dir, 85)
    }

    pub fn with_quality(out_dir: impl Into<PathBuf>, jpeg_quality: u8) -> Self {
        Self {
            out_dir: out_dir.into(),
            jpeg_quality,
        }
    }

    /// Extract every window in one forward pass over a fresh source.
    ///
    /// Returns the per-clip directories, one per spec, in spec order.
    /// Overlapping windows each receive their own copy of shared frames.
    pub fn extract<S: FrameSource>(
        &self,
        source: &mut S,
        specs: &[SubclipSpec],
    ) -> Result<Vec<PathBuf>, MovieError> {
        let frame_rate = source.frame_rate();
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(MovieError::InvalidFrameRate(frame_rate));
        }

        let dirs: Vec<PathBuf> = (0..specs.len())
            .map(|i| self.out_dir.join(format!("clip_{:02}", i + 1)))
            .collect();
        for dir in &dirs {
            fs::create_dir_all(dir)?;
        }
        let last_end = specs.iter().fold(0.0_f64, |acc, spec| acc.max(spec.end));

        let mut frame_index: u64 = 0;
        let mut written: u64 = 0;
        while let Some(frame) = source.next_frame()? {
            let time = frame_index as f64 / frame_rate;
            if time > last_end {
                break;
            }
            for (spec, dir) in specs.iter().zip(&dirs) {
                if spec.contains(time) {
                    let path = dir.join(format!("frame_{frame_index:06}.jpg"));
                    fs::write(&path, encode_jpeg(&frame, self.jpeg_quality)?)?;
                    written += 1;
                }
            }
            frame_index += 1;
        }
        info!(
            "✓ dumped {} frames across {} sub-clips under {:?}",
            written,
            specs.len(),
            self.out_dir
        );
        Ok(dirs)
    }
}

fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, MovieError> {
    let img = RgbImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or(
        MovieError::BadFrameBuffer {
            width: frame.width,
            height: frame.height,
            expected: frame.pixel_count() * 3,
            got: frame.data.len(),
        },
    )?;
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageOutputFormat::Jpeg(quality))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecSource {
        frames: Vec<Frame>,
        next: usize,
        frame_rate: f64,
    }

    impl FrameSource for VecSource {
        fn next_frame(&mut self) -> Result<Option<Frame>, MovieError> {
            let frame = self.frames.get(self.next).cloned();
            self.next += 1;
            Ok(frame)
        }

        fn frame_rate(&self) -> f64 {
            self.frame_rate
        }

        fn duration(&self) -> Option<f64> {
            Some(self.frames.len() as f64 / self.frame_rate)
        }
    }

    #[test]
    fn test_centered_window_clamps_to_clip() {
        let spec = SubclipSpec::centered(1.0, 4.0, 10.0);
        assert_eq!((spec.start, spec.end), (0.0, 3.0));

        let spec = SubclipSpec::centered(9.5, 2.0, 10.0);
        assert_eq!((spec.start, spec.end), (8.5, 10.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let spec = SubclipSpec::centered(2.0, 2.0, 10.0);
        assert!(spec.contains(1.0));
        assert!(spec.contains(3.0));
        assert!(!spec.contains(3.01));
    }

    #[test]
    fn test_extract_dumps_window_frames() {
        let frames = (0..5u8)
            .map(|i| Frame::new(2, 2, vec![i * 40; 12]).unwrap())
            .collect();
        let mut source = VecSource {
            frames,
            next: 0,
            frame_rate: 1.0,
        };

        let out_dir =
            std::env::temp_dir().join(format!("stimlab_subclip_test_{}", std::process::id()));
        let writer = FrameDumpWriter::new(&out_dir);
        let specs = vec![SubclipSpec {
            center_time: 1.5,
            start: 1.0,
            end: 2.0,
        }];

        let dirs = writer.extract(&mut source, &specs).unwrap();
        assert_eq!(dirs.len(), 1);

        let mut names: Vec<String> = fs::read_dir(&dirs[0])
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["frame_000001.jpg", "frame_000002.jpg"]);

        fs::remove_dir_all(&out_dir).unwrap();
    }
}
