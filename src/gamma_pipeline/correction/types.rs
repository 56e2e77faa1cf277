/// Configuration for one kernel invocation. All fields are fixed before
/// streaming begins; invalid combinations surface from
/// [`GammaPipeline::new`](super::GammaPipeline::new), never mid-stream.
#[derive(Debug, Clone)]
pub struct GammaConfig {
    /// Per-sample bit width `D`, at most 8 so samples index a 256-entry table.
    pub bit_depth: u32,
    /// Channel count `C`. The reference shape is 3 (RGB).
    pub channels: usize,
    /// Pixels packed per stream word `P`.
    pub pixels_per_word: usize,
    /// Per-lane table replicas. `None` keeps one shared read-only table;
    /// replicas are value-identical and only affect throughput.
    pub table_lanes: Option<usize>,
    /// Fan rows out across worker threads. Output is byte-identical to the
    /// sequential pass.
    pub parallel: bool,
    pub validate_dimensions: bool,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            bit_depth: 8,
            channels: 3,
            pixels_per_word: 1,
            table_lanes: None,
            parallel: false,
            validate_dimensions: true,
        }
    }
}

impl GammaConfig {
    pub fn builder() -> GammaConfigBuilder {
        GammaConfigBuilder::default()
    }

    /// Bytes the flat correction-table input must hold (`C x 256`).
    pub fn table_bytes(&self) -> usize {
        self.channels * crate::gamma_pipeline::table::TABLE_ENTRIES
    }
}

#[derive(Default)]
pub struct GammaConfigBuilder {
    bit_depth: Option<u32>,
    channels: Option<usize>,
    pixels_per_word: Option<usize>,
    table_lanes: Option<Option<usize>>,
    parallel: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl GammaConfigBuilder {
    pub fn bit_depth(mut self, bit_depth: u32) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn pixels_per_word(mut self, pixels_per_word: usize) -> Self {
        self.pixels_per_word = Some(pixels_per_word);
        self
    }

    pub fn table_lanes(mut self, table_lanes: Option<usize>) -> Self {
        self.table_lanes = Some(table_lanes);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> GammaConfig {
        let default = GammaConfig::default();
        GammaConfig {
            bit_depth: self.bit_depth.unwrap_or(default.bit_depth),
            channels: self.channels.unwrap_or(default.channels),
            pixels_per_word: self.pixels_per_word.unwrap_or(default.pixels_per_word),
            table_lanes: self.table_lanes.unwrap_or(default.table_lanes),
            parallel: self.parallel.unwrap_or(default.parallel),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}
