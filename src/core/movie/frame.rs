//! Decoded video frames and their luminance reduction.

use super::error::MovieError;
use rayon::prelude::*;

/// One decoded frame: tightly packed 8-bit RGB rows.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MovieError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(MovieError::BadFrameBuffer {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reduce to one luminance value per pixel.
    ///
    /// Uses uniform `(R + G + B) / 3` weighting rather than perceptual
    /// weights; the downstream analyses only need a grayscale proxy.
    pub fn luminance(&self) -> LumaPlane {
        let data: Vec<f64> = self
            .data
            .par_chunks_exact(3)
            .map(|px| (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0)
            .collect();
        LumaPlane {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Single-channel f64 image produced by luminance reduction.
#[derive(Debug, Clone)]
pub struct LumaPlane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f64>,
}

impl LumaPlane {
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Subtract the plane's own mean from every pixel.
    pub fn subtract_mean(&mut self) {
        let mean = self.mean();
        for v in &mut self.data {
            *v -= mean;
        }
    }

    /// Mean squared pixelwise difference against another plane of the same
    /// size. Not root-mean-square: no final square root is taken.
    pub fn mean_sq_diff(&self, other: &LumaPlane) -> f64 {
        debug_assert_eq!(self.data.len(), other.data.len());
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        sum / self.data.len() as f64
    }
}
