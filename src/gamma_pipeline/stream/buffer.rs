use crate::gamma_pipeline::common::{GammaError, Result};
use crate::gamma_pipeline::stream::{ImageDims, PixelSink, PixelSource};
use crate::gamma_pipeline::word::PixelWord;

/// Flat in-memory image stream: `height * width_in_words` packed words in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    dims: ImageDims,
    words: Vec<PixelWord>,
}

impl ImageBuffer {
    pub fn zeroed(dims: ImageDims) -> Self {
        Self {
            dims,
            words: vec![0; dims.word_count()],
        }
    }

    pub fn from_words(dims: ImageDims, words: Vec<PixelWord>) -> Result<Self> {
        if words.len() != dims.word_count() {
            return Err(GammaError::CapacityMismatch {
                expected: dims.word_count(),
                actual: words.len(),
            });
        }
        Ok(Self { dims, words })
    }

    pub fn dims(&self) -> ImageDims {
        self.dims
    }

    pub fn words(&self) -> &[PixelWord] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [PixelWord] {
        &mut self.words
    }

    pub fn into_words(self) -> Vec<PixelWord> {
        self.words
    }
}

impl PixelSource for ImageBuffer {
    fn read(&self, index: usize) -> Result<PixelWord> {
        self.words
            .get(index)
            .copied()
            .ok_or(GammaError::IndexOutOfRange {
                index,
                capacity: self.words.len(),
            })
    }
}

impl PixelSink for ImageBuffer {
    fn write(&mut self, index: usize, word: PixelWord) -> Result<()> {
        let capacity = self.words.len();
        match self.words.get_mut(index) {
            Some(slot) => {
                *slot = word;
                Ok(())
            }
            None => Err(GammaError::IndexOutOfRange { index, capacity }),
        }
    }
}
