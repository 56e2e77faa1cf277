//! Table-driven gamma correction for packed pixel streams.
//!
//! The [`gamma_pipeline`] module holds the whole kernel: table loading,
//! pixel-word packing, and the row-major streaming driver.

pub mod gamma_pipeline;
pub mod logger;
