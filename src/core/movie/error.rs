use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("metadata error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame rate must be positive, got {0}")]
    InvalidFrameRate(f64),
    #[error("no end time given and clip duration is unknown")]
    MissingDuration,
    #[error("activity signal has not been computed yet")]
    ActivityNotComputed,
    #[error(
        "frame size changed mid-stream: expected {expected_width}x{expected_height}, \
         got {width}x{height}"
    )]
    FrameSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
    #[error("signal sample {index} is not finite")]
    NonFiniteSample { index: usize },
    #[error("frame buffer is {got} bytes, expected {expected} for {width}x{height} RGB")]
    BadFrameBuffer {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}
