//! Scan tree container and budget counters.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::node::ScanNode;

/// Mutable counters used to enforce global scan budgets.
///
/// One instance is owned exclusively by one scan invocation and threaded
/// through its recursive calls; it is discarded once the scan returns and
/// is never shared across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    /// Files recorded so far.
    pub total_files: u64,
    /// Bytes recorded so far.
    pub total_size: u64,
}

impl ScanStats {
    /// Create fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file of the given size.
    pub fn record_file(&mut self, size: u64) {
        self.total_files += 1;
        self.total_size += size;
    }

    /// Check whether adding `size` bytes would push past the size budget.
    pub fn would_exceed_size(&self, size: u64, max_total_size: u64) -> bool {
        self.total_size + size > max_total_size
    }
}

/// Completed scan result: the node tree plus scan metadata.
#[derive(Debug, Clone)]
pub struct ScanTree {
    /// Root node of the tree (named after the scan root's basename).
    pub root: ScanNode,

    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Non-fatal skip conditions encountered during the scan.
    pub warnings: Vec<ScanWarning>,
}

impl ScanTree {
    /// Create a new scan tree.
    pub fn new(
        root: ScanNode,
        root_path: PathBuf,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration,
            warnings,
        }
    }

    /// Get the total size of the tree in bytes.
    pub fn total_size(&self) -> u64 {
        self.root.size
    }

    /// Get the total number of files in the tree.
    pub fn total_files(&self) -> u64 {
        self.root.file_count()
    }

    /// Get the total number of directories in the tree (excluding the root).
    pub fn total_dirs(&self) -> u64 {
        self.root.dir_count()
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Serializable snapshot summary statistics (no tree payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeTotals {
    /// Total size in bytes.
    pub total_size: u64,
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories.
    pub total_dirs: u64,
}

impl From<&ScanTree> for TreeTotals {
    fn from(tree: &ScanTree) -> Self {
        Self {
            total_size: tree.total_size(),
            total_files: tree.total_files(),
            total_dirs: tree.total_dirs(),
        }
    }
}
