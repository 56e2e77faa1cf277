//! Pixel-word packing module
//!
//! This module decomposes packed pixel words into per-channel samples and
//! reassembles corrected samples at the same bit offsets.

mod codec;
mod types;


pub use types::{PixelWord, WordLayout};
