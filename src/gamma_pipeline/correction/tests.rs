use crate::gamma_pipeline::common::GammaError;
use crate::gamma_pipeline::correction::{GammaConfig, GammaPipeline};
use crate::gamma_pipeline::stream::{ImageBuffer, ImageDims, PixelSink, PixelSource};
use crate::gamma_pipeline::word::PixelWord;

fn table_from_fn(channels: usize, f: impl Fn(usize, u8) -> u8) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(channels * 256);
    for channel in 0..channels {
        for value in 0..=255u8 {
            bytes.push(f(channel, value));
        }
    }
    bytes
}

fn identity_table(channels: usize) -> Vec<u8> {
    table_from_fn(channels, |_, v| v)
}

fn rgb_pipeline(table: &[u8]) -> GammaPipeline {
    GammaPipeline::new(GammaConfig::default(), table).unwrap()
}

/// Deterministic RGB test image: one word per pixel, samples derived from
/// the flat index.
fn gradient_image(dims: ImageDims) -> ImageBuffer {
    let pipeline = rgb_pipeline(&identity_table(3));
    let layout = pipeline.layout();
    let words = (0..dims.word_count())
        .map(|i| {
            let r = (i % 256) as u8;
            let g = (i * 7 % 256) as u8;
            let b = (i * 13 % 256) as u8;
            layout.encode(&[r, g, b])
        })
        .collect();
    ImageBuffer::from_words(dims, words).unwrap()
}

struct FailingSource;

impl PixelSource for FailingSource {
    fn read(&self, index: usize) -> crate::gamma_pipeline::Result<PixelWord> {
        Err(GammaError::IndexOutOfRange { index, capacity: 0 })
    }
}

#[derive(Default)]
struct RecordingSink {
    writes: Vec<(usize, PixelWord)>,
}

impl PixelSink for RecordingSink {
    fn write(&mut self, index: usize, word: PixelWord) -> crate::gamma_pipeline::Result<()> {
        self.writes.push((index, word));
        Ok(())
    }
}

#[test]
fn config_builder_overrides_defaults() {
    let config = GammaConfig::builder()
        .bit_depth(6)
        .channels(4)
        .pixels_per_word(2)
        .table_lanes(Some(2))
        .parallel(true)
        .validate_dimensions(false)
        .build();

    assert_eq!(config.bit_depth, 6);
    assert_eq!(config.channels, 4);
    assert_eq!(config.pixels_per_word, 2);
    assert_eq!(config.table_lanes, Some(2));
    assert!(config.parallel);
    assert!(!config.validate_dimensions);
    assert_eq!(config.table_bytes(), 4 * 256);
}

#[test]
fn identity_table_preserves_image() {
    let dims = ImageDims::new(4, 5);
    let src = gradient_image(dims);
    let pipeline = rgb_pipeline(&identity_table(3));

    let dst = pipeline.apply_image(&src).unwrap();

    assert_eq!(dst.words(), src.words());
}

#[test]
fn every_index_written_once_in_order() {
    let dims = ImageDims::new(3, 4);
    let src = gradient_image(dims);
    let pipeline = rgb_pipeline(&table_from_fn(3, |_, v| v.wrapping_add(1)));

    let mut sink = RecordingSink::default();
    pipeline.apply(&src, &mut sink, dims).unwrap();

    let indices: Vec<usize> = sink.writes.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, (0..dims.word_count()).collect::<Vec<_>>());

    // each output word derives from the source word at the same index
    for (index, word) in sink.writes {
        assert_eq!(word, pipeline.correct_word(src.read(index).unwrap()));
    }
}

#[test]
fn samples_map_through_their_channel_table() {
    let table = table_from_fn(3, |channel, v| match channel {
        0 => v.wrapping_mul(3),
        1 => 255 - v,
        _ => v / 2,
    });
    let config = GammaConfig::builder().pixels_per_word(2).build();
    let pipeline = GammaPipeline::new(config, &table).unwrap();
    let layout = pipeline.layout();

    let input = [10u8, 20, 30, 200, 150, 99];
    let output = layout.decode(pipeline.correct_word(layout.encode(&input)));

    for pixel in 0..2 {
        let base = pixel * 3;
        assert_eq!(output[base], input[base].wrapping_mul(3));
        assert_eq!(output[base + 1], 255 - input[base + 1]);
        assert_eq!(output[base + 2], input[base + 2] / 2);
    }
}

#[test]
fn inverse_table_round_trips_image() {
    // v + 1 mod 256 and its exact inverse
    let forward = rgb_pipeline(&table_from_fn(3, |_, v| v.wrapping_add(1)));
    let inverse = rgb_pipeline(&table_from_fn(3, |_, v| v.wrapping_sub(1)));

    let dims = ImageDims::new(6, 3);
    let src = gradient_image(dims);

    let corrected = forward.apply_image(&src).unwrap();
    let restored = inverse.apply_image(&corrected).unwrap();

    assert_eq!(restored, src);
}

#[test]
fn parallel_pass_matches_sequential() {
    let table = table_from_fn(3, |channel, v| v.wrapping_add(channel as u8 + 1));
    let dims = ImageDims::new(16, 9);
    let src = gradient_image(dims);

    let sequential = rgb_pipeline(&table);
    let parallel = GammaPipeline::new(
        GammaConfig::builder().parallel(true).build(),
        &table,
    )
    .unwrap();

    assert_eq!(
        sequential.apply_image(&src).unwrap(),
        parallel.apply_image(&src).unwrap()
    );
}

#[test]
fn lane_replicas_do_not_change_results() {
    let table = table_from_fn(3, |_, v| 255 - v);
    let single = GammaPipeline::new(
        GammaConfig::builder().pixels_per_word(2).build(),
        &table,
    )
    .unwrap();
    let replicated = GammaPipeline::new(
        GammaConfig::builder()
            .pixels_per_word(2)
            .table_lanes(Some(4))
            .build(),
        &table,
    )
    .unwrap();

    let word = single.layout().encode(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(single.correct_word(word), replicated.correct_word(word));
}

#[test]
fn wide_words_match_single_pixel_layout() {
    let table = table_from_fn(3, |channel, v| v.wrapping_mul(channel as u8 + 2));

    let narrow = rgb_pipeline(&table);
    let wide = GammaPipeline::new(
        GammaConfig::builder().pixels_per_word(2).build(),
        &table,
    )
    .unwrap();

    // same 8 pixels, packed one per word and two per word
    let pixels: Vec<[u8; 3]> = (0..8).map(|i| [i as u8, 10 + i as u8, 100 + i as u8]).collect();

    let narrow_words: Vec<PixelWord> =
        pixels.iter().map(|px| narrow.layout().encode(px)).collect();
    let narrow_src = ImageBuffer::from_words(ImageDims::new(2, 4), narrow_words).unwrap();
    let narrow_out = narrow.apply_image(&narrow_src).unwrap();

    let wide_words: Vec<PixelWord> = pixels
        .chunks_exact(2)
        .map(|pair| {
            let samples: Vec<u8> = pair.iter().flatten().copied().collect();
            wide.layout().encode(&samples)
        })
        .collect();
    let wide_src = ImageBuffer::from_words(ImageDims::new(2, 2), wide_words).unwrap();
    let wide_out = wide.apply_image(&wide_src).unwrap();

    let narrow_samples: Vec<u8> = narrow_out
        .words()
        .iter()
        .flat_map(|&w| narrow.layout().decode(w))
        .collect();
    let wide_samples: Vec<u8> = wide_out
        .words()
        .iter()
        .flat_map(|&w| wide.layout().decode(w))
        .collect();

    assert_eq!(narrow_samples, wide_samples);
}

#[test]
fn single_word_image_with_negation_table() {
    let pipeline = rgb_pipeline(&table_from_fn(3, |_, v| 255 - v));
    let layout = pipeline.layout();

    let src =
        ImageBuffer::from_words(ImageDims::new(1, 1), vec![layout.encode(&[12, 200, 7])]).unwrap();
    let dst = pipeline.apply_image(&src).unwrap();

    assert_eq!(layout.decode(dst.words()[0]), vec![243, 55, 248]);
}

#[test]
fn zeroing_one_channel_leaves_others_untouched() {
    // identity on channels 0 and 1, channel 2 forced to zero
    let table = table_from_fn(3, |channel, v| if channel == 2 { 0 } else { v });
    let pipeline = rgb_pipeline(&table);
    let layout = pipeline.layout();

    let dims = ImageDims::new(2, 1);
    let words = vec![layout.encode(&[10, 20, 30]); 2];
    let src = ImageBuffer::from_words(dims, words).unwrap();

    let dst = pipeline.apply_image(&src).unwrap();

    for &word in dst.words() {
        assert_eq!(layout.decode(word), vec![10, 20, 0]);
    }
}

#[test]
fn rejects_wrong_table_length() {
    let err = GammaPipeline::new(GammaConfig::default(), &[0u8; 512]).unwrap_err();
    assert!(matches!(
        err,
        GammaError::InvalidTableLength {
            expected: 768,
            actual: 512,
            ..
        }
    ));
}

#[test]
fn rejects_zero_dimensions() {
    let pipeline = rgb_pipeline(&identity_table(3));
    let src = gradient_image(ImageDims::new(2, 2));
    let mut sink = RecordingSink::default();

    let err = pipeline
        .apply(&src, &mut sink, ImageDims::new(0, 2))
        .unwrap_err();

    assert!(matches!(err, GammaError::InvalidDimensions(0, 2)));
    assert!(sink.writes.is_empty());
}

#[test]
fn source_errors_propagate_before_any_write() {
    let pipeline = rgb_pipeline(&identity_table(3));
    let mut sink = RecordingSink::default();

    let err = pipeline
        .apply(&FailingSource, &mut sink, ImageDims::new(1, 1))
        .unwrap_err();

    assert!(matches!(err, GammaError::IndexOutOfRange { .. }));
    assert!(sink.writes.is_empty());
}

#[test]
fn undersized_stream_raises_out_of_range() {
    let pipeline = rgb_pipeline(&identity_table(3));
    // buffer holds 4 words, dimensions claim 6
    let src = gradient_image(ImageDims::new(2, 2));
    let mut dst = ImageBuffer::zeroed(ImageDims::new(2, 3));

    let err = pipeline
        .apply(&src, &mut dst, ImageDims::new(2, 3))
        .unwrap_err();

    assert!(matches!(
        err,
        GammaError::IndexOutOfRange { index: 4, capacity: 4 }
    ));
}

#[test]
fn timed_pass_records_stream_stage() {
    let dims = ImageDims::new(4, 4);
    let src = gradient_image(dims);
    let pipeline = rgb_pipeline(&identity_table(3));
    let mut dst = ImageBuffer::zeroed(dims);

    let timings = pipeline.apply_with_timings(&src, &mut dst, dims).unwrap();

    assert!(timings.get_step("stream_pass").is_some());
    assert_eq!(dst.words(), src.words());
}
