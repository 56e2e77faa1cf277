use rayon::prelude::*;
use tracing::{info, instrument};

use crate::gamma_pipeline::{
    common::{GammaError, Result},
    correction::{GammaConfig, PipelineTimings, Timer},
    stream::{ImageBuffer, ImageDims, PixelSink, PixelSource},
    table::TableStore,
    word::{PixelWord, WordLayout},
};

/// Row-major streaming driver: reads one packed word per iteration, routes it
/// through decode, per-channel table lookup, and encode, and writes the
/// result back at the same flat index.
#[derive(Debug)]
pub struct GammaPipeline {
    layout: WordLayout,
    tables: TableStore,
    config: GammaConfig,
}

impl GammaPipeline {
    /// Validates the word layout and loads the correction tables. Every
    /// configuration error is raised here, before any word is read or
    /// written.
    pub fn new(config: GammaConfig, table_bytes: &[u8]) -> Result<Self> {
        let layout = WordLayout::new(config.pixels_per_word, config.channels, config.bit_depth)?;
        let tables = TableStore::load(table_bytes, config.channels, config.table_lanes.unwrap_or(1))?;

        Ok(Self {
            layout,
            tables,
            config,
        })
    }

    fn validate_dimensions(&self, dims: ImageDims) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }
        dims.validate()
    }

    /// Map every decoded sample through its channel's table. Sample `i`
    /// belongs to pixel lane `i / C`, channel `i % C`.
    #[inline]
    fn correct_samples(&self, samples: &mut [u8]) {
        let channels = self.layout.channels();
        for (index, sample) in samples.iter_mut().enumerate() {
            *sample = self
                .tables
                .lookup(index / channels, index % channels, *sample);
        }
    }

    /// Decode, correct, and re-encode one word using a caller-owned scratch
    /// buffer of `samples_per_word()` bytes.
    #[inline]
    fn correct_word_into(&self, word: PixelWord, scratch: &mut [u8]) -> PixelWord {
        self.layout.decode_into(word, scratch);
        self.correct_samples(scratch);
        self.layout.encode(scratch)
    }

    /// Correct a single packed word.
    pub fn correct_word(&self, word: PixelWord) -> PixelWord {
        let mut samples = self.layout.decode(word);
        self.correct_samples(&mut samples);
        self.layout.encode(&samples)
    }

    /// One sequential pass over the image: exactly
    /// `height * width_in_words` iterations in row-major order, each writing
    /// destination index `i` from source index `i` alone.
    #[instrument(skip(self, src, dst), fields(height = dims.height, width_in_words = dims.width_in_words))]
    pub fn apply<S, K>(&self, src: &S, dst: &mut K, dims: ImageDims) -> Result<()>
    where
        S: PixelSource + ?Sized,
        K: PixelSink + ?Sized,
    {
        self.validate_dimensions(dims)?;
        info!("starting gamma correction pass");

        let mut scratch = vec![0u8; self.layout.samples_per_word()];
        for row in 0..dims.height {
            for col in 0..dims.width_in_words {
                let index = row * dims.width_in_words + col;
                let word = src.read(index)?;
                dst.write(index, self.correct_word_into(word, &mut scratch))?;
            }
        }

        info!(words = dims.word_count(), "gamma correction pass complete");
        Ok(())
    }

    /// Same pass as [`GammaPipeline::apply`] with per-stage timings.
    pub fn apply_with_timings<S, K>(
        &self,
        src: &S,
        dst: &mut K,
        dims: ImageDims,
    ) -> Result<PipelineTimings>
    where
        S: PixelSource + ?Sized,
        K: PixelSink + ?Sized,
    {
        let mut timings = PipelineTimings::new();

        let timer = Timer::start("validate_dimensions");
        self.validate_dimensions(dims)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let timer = Timer::start("stream_pass");
        let mut scratch = vec![0u8; self.layout.samples_per_word()];
        for row in 0..dims.height {
            for col in 0..dims.width_in_words {
                let index = row * dims.width_in_words + col;
                let word = src.read(index)?;
                dst.write(index, self.correct_word_into(word, &mut scratch))?;
            }
        }
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        Ok(timings)
    }

    /// Correct a whole in-memory image, honoring `config.parallel`.
    ///
    /// The parallel path fans rows out over worker threads against disjoint
    /// destination row slices; every word's correction is independent, so the
    /// output is byte-identical to the sequential pass.
    pub fn apply_image(&self, src: &ImageBuffer) -> Result<ImageBuffer> {
        let dims = src.dims();
        self.validate_dimensions(dims)?;

        let mut dst = ImageBuffer::zeroed(dims);
        if dims.word_count() == 0 {
            return Ok(dst);
        }
        if self.config.parallel {
            dst.words_mut()
                .par_chunks_mut(dims.width_in_words)
                .zip(src.words().par_chunks(dims.width_in_words))
                .for_each(|(dst_row, src_row)| {
                    let mut scratch = vec![0u8; self.layout.samples_per_word()];
                    for (slot, &word) in dst_row.iter_mut().zip(src_row) {
                        *slot = self.correct_word_into(word, &mut scratch);
                    }
                });
            Ok(dst)
        } else {
            self.apply(src, &mut dst, dims)?;
            Ok(dst)
        }
    }

    pub fn config(&self) -> &GammaConfig {
        &self.config
    }

    pub fn layout(&self) -> WordLayout {
        self.layout
    }

    /// Swap runtime knobs without reloading the tables. The channel count is
    /// fixed by the loaded table store.
    pub fn set_config(&mut self, config: GammaConfig) -> Result<()> {
        if config.channels != self.tables.channel_count() {
            return Err(GammaError::InvalidWordLayout(format!(
                "channel count {} does not match the {} loaded channel tables",
                config.channels,
                self.tables.channel_count()
            )));
        }
        self.layout = WordLayout::new(config.pixels_per_word, config.channels, config.bit_depth)?;
        self.tables = self.tables.with_lane_count(config.table_lanes.unwrap_or(1))?;
        self.config = config;
        Ok(())
    }
}
