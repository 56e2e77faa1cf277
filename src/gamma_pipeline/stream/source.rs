use crate::gamma_pipeline::common::Result;
use crate::gamma_pipeline::word::PixelWord;

/// Ordered read access to a source image stream.
///
/// Implementations own their storage and bounds; a read past the stream's
/// capacity is a configuration error surfaced by the implementation.
pub trait PixelSource {
    fn read(&self, index: usize) -> Result<PixelWord>;
}
