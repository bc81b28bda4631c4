//! Forward-only frame sources.

use super::error::MovieError;
use super::frame::Frame;
use log::debug;
use std::path::PathBuf;

/// A forward-only, single-pass sequence of decoded frames plus the scalar
/// metadata the analyses need.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, MovieError>;
    /// Frames per second.
    fn frame_rate(&self) -> f64;
    /// Total duration in seconds, when known.
    fn duration(&self) -> Option<f64>;
}

/// Decodes an ordered directory of frame-dump image files as a frame stream.
///
/// Stands in for a real video decoder; the acquisition side dumps frames as
/// numbered images. Frame order is the lexicographic file-name order.
pub struct ImageDirSource {
    files: Vec<PathBuf>,
    next: usize,
    frame_rate: f64,
}

impl ImageDirSource {
    pub fn open(dir: impl Into<PathBuf>, frame_rate: f64) -> Result<Self, MovieError> {
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(MovieError::InvalidFrameRate(frame_rate));
        }
        let dir = dir.into();
        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        debug!("{} frame files under {:?}", files.len(), dir);
        Ok(Self {
            files,
            next: 0,
            frame_rate,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.files.len()
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, MovieError> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Frame::new(width, height, rgb.into_raw()).map(Some)
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn duration(&self) -> Option<f64> {
        Some(self.files.len() as f64 / self.frame_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_image_dir_source_reads_in_name_order() {
        let dir = std::env::temp_dir().join(format!("stimlab_src_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for (i, fill) in [(0u32, 10u8), (1, 200)] {
            let img = RgbImage::from_pixel(4, 2, image::Rgb([fill, fill, fill]));
            img.save(dir.join(format!("frame_{i:04}.png"))).unwrap();
        }

        let mut source = ImageDirSource::open(&dir, 30.0).unwrap();
        assert_eq!(source.frame_count(), 2);
        assert_eq!(source.duration(), Some(2.0 / 30.0));

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!((first.width, first.height), (4, 2));
        assert_eq!(first.data[0], 10);

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.data[0], 200);

        assert!(source.next_frame().unwrap().is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_bad_frame_rate() {
        let result = ImageDirSource::open(".", 0.0);
        assert!(matches!(result, Err(MovieError::InvalidFrameRate(_))));
    }
}
