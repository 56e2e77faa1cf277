use thiserror::Error;

#[derive(Error, Debug)]
pub enum GammaError {
    #[error("correction table must be {expected} bytes ({channels} channels x 256 entries), got {actual}")]
    InvalidTableLength {
        channels: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported sample bit depth: {0} (supported range is 1..=8)")]
    InvalidBitDepth(u32),

    #[error("invalid word layout: {0}")]
    InvalidWordLayout(String),

    #[error("invalid image dimensions: height={0}, width_in_words={1}")]
    InvalidDimensions(usize, usize),

    #[error("stream index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("buffer holds {actual} words but dimensions require {expected}")]
    CapacityMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, GammaError>;
