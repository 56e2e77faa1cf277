//! Correction table module
//!
//! This module loads the flat channel-major table bytes and serves exact
//! 256-entry lookups, optionally replicated per lane.

mod store;


pub use store::{CorrectionTable, TABLE_ENTRIES, TableStore};
