use anyhow::Result;
use gamma_remap_rs::gamma_pipeline::{GammaConfig, GammaPipeline, ImageBuffer, ImageDims};
use gamma_remap_rs::logger;

use tracing::info;

/// Channel-major 2.2 gamma curve, 3 x 256 entries. Table contents are the
/// caller's business; the kernel treats them as opaque bytes.
fn encoding_gamma_table(gamma: f64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(3 * 256);
    for _channel in 0..3 {
        for value in 0..=255u8 {
            let normalized = value as f64 / 255.0;
            let corrected = normalized.powf(1.0 / gamma) * 255.0;
            bytes.push(corrected.round() as u8);
        }
    }
    bytes
}

fn synthetic_frame(pipeline: &GammaPipeline, dims: ImageDims) -> Result<ImageBuffer> {
    let layout = pipeline.layout();
    let words = (0..dims.word_count())
        .map(|i| {
            let row = i / dims.width_in_words;
            let col = i % dims.width_in_words;
            layout.encode(&[(col % 256) as u8, (row % 256) as u8, ((row + col) % 256) as u8])
        })
        .collect();
    Ok(ImageBuffer::from_words(dims, words)?)
}

fn main() -> Result<()> {
    logger::init();

    info!("Starting gamma_remap...");

    let config = GammaConfig::builder().parallel(true).build();
    let pipeline = GammaPipeline::new(config, &encoding_gamma_table(2.2))?;

    info!("Gamma correction pipeline initialized");
    info!("Bit depth: {}", pipeline.config().bit_depth);
    info!("Pixels per word: {}", pipeline.config().pixels_per_word);
    info!(
        "Row fan-out: {}",
        if pipeline.config().parallel {
            "enabled"
        } else {
            "disabled"
        }
    );

    let dims = ImageDims::from_pixel_cols(1080, 1920, pipeline.config().pixels_per_word)?;
    let frame = synthetic_frame(&pipeline, dims)?;

    let mut corrected = ImageBuffer::zeroed(dims);
    let timings = pipeline.apply_with_timings(&frame, &mut corrected, dims)?;
    timings.log_summary();

    let sample = pipeline.layout().decode(corrected.words()[dims.width_in_words + 1]);
    info!("Corrected pixel (1,1): {:?}", sample);

    Ok(())
}
