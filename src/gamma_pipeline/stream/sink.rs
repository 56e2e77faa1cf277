use crate::gamma_pipeline::common::Result;
use crate::gamma_pipeline::word::PixelWord;

/// Ordered write access to a destination image stream.
pub trait PixelSink {
    fn write(&mut self, index: usize, word: PixelWord) -> Result<()>;
}
