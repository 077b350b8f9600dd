//! Core types for repogist.
//!
//! This crate provides the fundamental data structures shared by the
//! scanning and output crates: scan nodes and trees, budget counters,
//! filter specifications, and error/warning types.

mod config;
mod error;
mod node;
mod tree;

pub use config::{
    FilterSpec, PatternMode, ScanConfig, ScanConfigBuilder, DEFAULT_MAX_FILE_SIZE,
    MAX_DIRECTORY_DEPTH, MAX_FILES, MAX_TOTAL_SIZE_BYTES,
};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use node::{NodeKind, ScanNode};
pub use tree::{ScanStats, ScanTree, TreeTotals};
