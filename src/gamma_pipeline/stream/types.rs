use crate::gamma_pipeline::common::{GammaError, Result};

/// Geometry of one image stream: `height` rows of `width_in_words` packed
/// words, addressed row-major by the flat index
/// `row * width_in_words + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDims {
    pub height: usize,
    pub width_in_words: usize,
}

impl ImageDims {
    pub fn new(height: usize, width_in_words: usize) -> Self {
        Self {
            height,
            width_in_words,
        }
    }

    /// Geometry from pixel columns: `cols` pixels per row packed
    /// `pixels_per_word` at a time. `cols` must divide evenly.
    pub fn from_pixel_cols(height: usize, cols: usize, pixels_per_word: usize) -> Result<Self> {
        if pixels_per_word == 0 || cols % pixels_per_word != 0 {
            return Err(GammaError::InvalidDimensions(height, cols));
        }
        Ok(Self::new(height, cols / pixels_per_word))
    }

    /// Total words in the stream.
    pub fn word_count(&self) -> usize {
        self.height * self.width_in_words
    }

    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width_in_words == 0 {
            return Err(GammaError::InvalidDimensions(
                self.height,
                self.width_in_words,
            ));
        }
        Ok(())
    }
}
