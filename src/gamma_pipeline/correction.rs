//! Correction driver module
//!
//! This module contains the configuration surface and the row-major streaming
//! driver that routes every word through decode, lookup, and encode.

mod pipeline;
mod timing;
mod types;

#[cfg(test)]
mod tests;

pub use pipeline::GammaPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{GammaConfig, GammaConfigBuilder};
