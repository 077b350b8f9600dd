//! Output projections for repogist scan trees.
//!
//! Everything in this crate operates on a finished, immutable
//! [`ScanTree`](repogist_core::ScanTree): rendering the line-drawing tree
//! text, extracting text-file bodies under the built-in ignore list and the
//! user filter, and assembling the final [`Snapshot`]. The render and
//! extract passes never mutate the tree, so [`build_snapshot`] runs them in
//! parallel.

mod extract;
mod render;
mod snapshot;
mod tokens;

pub use extract::{is_text_file, ContentExtractor, ExtractedFile};
pub use render::render_tree;
pub use snapshot::{
    assemble_content, build_snapshot, repository_identifier, Snapshot, SnapshotSummary,
};
pub use tokens::{format_token_count, CharRatioEstimator, TokenEstimator};

// Re-export core types for convenience
pub use repogist_core::{FilterSpec, PatternMode, ScanConfig, ScanError, ScanTree};
