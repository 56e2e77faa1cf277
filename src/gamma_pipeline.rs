//! Gamma correction pipeline module
//!
//! This module applies a precomputed per-channel lookup table to every sample
//! of a packed pixel stream, with separate modules for table storage,
//! pixel-word packing, stream access, and the streaming driver.

pub mod common;
pub mod correction;
pub mod stream;
pub mod table;
pub mod word;

pub use common::{GammaError, Result};

pub use table::{CorrectionTable, TableStore};

pub use word::{PixelWord, WordLayout};

pub use stream::{ImageBuffer, ImageDims, PixelSink, PixelSource};

pub use correction::{
    GammaConfig, GammaConfigBuilder, GammaPipeline, PipelineTimings, StepTiming, Timer,
};
