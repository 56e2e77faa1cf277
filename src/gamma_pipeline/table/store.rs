use tracing::debug;

use crate::gamma_pipeline::common::{GammaError, Result};

/// Entries per channel table. Samples are at most 8 bits wide, so every
/// decoded value indexes in-bounds.
pub const TABLE_ENTRIES: usize = 256;

/// One corrected-value mapping per channel, loaded from a flat channel-major
/// byte array (bytes `c*256..(c+1)*256` belong to channel `c`).
///
/// Immutable once loaded; entries are opaque corrected outputs and are not
/// validated beyond the total length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTable {
    channels: Vec<[u8; TABLE_ENTRIES]>,
}

impl CorrectionTable {
    pub fn from_flat(bytes: &[u8], channels: usize) -> Result<Self> {
        let expected = channels * TABLE_ENTRIES;
        if channels == 0 || bytes.len() != expected {
            return Err(GammaError::InvalidTableLength {
                channels,
                expected,
                actual: bytes.len(),
            });
        }

        let channels = bytes
            .chunks_exact(TABLE_ENTRIES)
            .map(|chunk| {
                let mut table = [0u8; TABLE_ENTRIES];
                table.copy_from_slice(chunk);
                table
            })
            .collect();

        Ok(Self { channels })
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn lookup(&self, channel: usize, value: u8) -> u8 {
        self.channels[channel][value as usize]
    }
}

/// The shared table store for one kernel invocation.
///
/// Holds `lanes` value-identical replicas of the loaded table. One shared
/// copy (`lanes == 1`) is always correct; extra replicas only spread reads
/// across cache lines under heavy worker contention and never change results.
/// Read-only for the entire streaming phase.
#[derive(Debug, Clone)]
pub struct TableStore {
    lanes: Vec<CorrectionTable>,
}

impl TableStore {
    pub fn load(bytes: &[u8], channels: usize, lanes: usize) -> Result<Self> {
        if lanes == 0 {
            return Err(GammaError::InvalidWordLayout(
                "table lane count must be at least 1".to_string(),
            ));
        }

        let table = CorrectionTable::from_flat(bytes, channels)?;
        debug!(channels, lanes, "correction tables loaded");

        Ok(Self {
            lanes: vec![table; lanes],
        })
    }

    /// The same table replicated into a different lane count.
    pub fn with_lane_count(&self, lanes: usize) -> Result<Self> {
        if lanes == 0 {
            return Err(GammaError::InvalidWordLayout(
                "table lane count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            lanes: vec![self.lanes[0].clone(); lanes],
        })
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn channel_count(&self) -> usize {
        self.lanes[0].channel_count()
    }

    /// Exact table lookup for one sample: replica `lane mod L`, channel
    /// table `channel`, entry `value`. No interpolation, clamping, or
    /// rounding.
    #[inline]
    pub fn lookup(&self, lane: usize, channel: usize, value: u8) -> u8 {
        self.lanes[lane % self.lanes.len()].lookup(channel, value)
    }
}
