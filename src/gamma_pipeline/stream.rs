//! Image stream module
//!
//! This module defines the read/write seams the kernel streams through and a
//! flat in-memory image buffer implementing both.

mod buffer;
mod sink;
mod source;
mod types;


pub use buffer::ImageBuffer;
pub use sink::PixelSink;
pub use source::PixelSource;
pub use types::ImageDims;
