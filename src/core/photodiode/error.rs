use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotodiodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sampling rate must be positive, got {0}")]
    InvalidSamplingRate(f64),
    #[error("channel {channel} out of range for a {channel_count}-channel recording")]
    ChannelOutOfRange { channel: usize, channel_count: usize },
    #[error(
        "chunk '{id}': {byte_len} bytes is not a whole number of {channel_count}-channel i16 frames"
    )]
    MalformedChunk {
        id: String,
        byte_len: usize,
        channel_count: usize,
    },
}
