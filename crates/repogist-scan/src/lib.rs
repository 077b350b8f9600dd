//! Bounded directory traversal engine for repogist.
//!
//! This crate walks an already-materialized repository checkout and builds
//! the in-memory node tree the output crate projects from. Key behaviors:
//!
//! - **Budget enforcement**: depth, file-count, and total-size ceilings,
//!   checked before each directory and per file; exceeding a budget prunes,
//!   it never fails the scan.
//! - **Symlink safety**: targets must resolve inside the scan root; a
//!   visited-set of canonical paths terminates cycles and suppresses
//!   hard-linked duplicates.
//! - **Root-relative filtering**: user glob patterns are matched against
//!   paths relative to the scan root at every depth.
//! - **Progress updates** via a broadcast channel.
//!
//! # Example
//!
//! ```rust,no_run
//! use repogist_scan::{ScanConfig, TreeScanner};
//!
//! let config = ScanConfig::new("/path/to/checkout");
//! let tree = TreeScanner::new().scan(&config).unwrap();
//!
//! println!("{} files, {} bytes", tree.total_files(), tree.total_size());
//! ```

mod filter;
mod progress;
mod safety;
mod scanner;

pub use filter::{is_builtin_ignored, GlobFilter};
pub use progress::ScanProgress;
pub use safety::PathSafetyGuard;
pub use scanner::TreeScanner;

// Re-export core types for convenience
pub use repogist_core::{
    FilterSpec, NodeKind, PatternMode, ScanConfig, ScanError, ScanNode, ScanStats, ScanTree,
    ScanWarning, WarningKind,
};
