//! Scan configuration and filter specification types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Maximum directory depth a scan will descend to.
pub const MAX_DIRECTORY_DEPTH: u32 = 20;

/// Maximum number of files a scan will record.
pub const MAX_FILES: u64 = 10_000;

/// Maximum total size in bytes a scan will accumulate (500 MiB).
pub const MAX_TOTAL_SIZE_BYTES: u64 = 500 * 1024 * 1024;

/// Default per-file size cap for content extraction (50 KiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024;

/// How a pattern list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// Only paths matching some pattern are processed.
    Include,
    /// Paths matching some pattern are rejected.
    Exclude,
}

impl std::fmt::Display for PatternMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternMode::Include => write!(f, "include"),
            PatternMode::Exclude => write!(f, "exclude"),
        }
    }
}

/// A set of glob patterns plus the mode they are evaluated under.
///
/// An empty pattern list passes everything regardless of mode. Patterns
/// are matched against the full path relative to the scan root, with
/// shell-style semantics (`*` crosses `/`, no recursive `**`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Glob patterns, in the order the caller supplied them.
    pub patterns: Vec<String>,
    /// Include or exclude interpretation.
    pub mode: PatternMode,
}

impl FilterSpec {
    /// Create a filter spec.
    pub fn new(patterns: Vec<String>, mode: PatternMode) -> Self {
        Self { patterns, mode }
    }

    /// A spec that passes every path.
    pub fn pass_all() -> Self {
        Self {
            patterns: Vec::new(),
            mode: PatternMode::Exclude,
        }
    }

    /// Check if no patterns were supplied.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::pass_all()
    }
}

/// Configuration for one scan-and-snapshot operation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan (an already-materialized local checkout).
    pub root: PathBuf,

    /// User-supplied filter applied during both scan and extraction.
    #[builder(default)]
    #[serde(default)]
    pub filter: FilterSpec,

    /// Maximum depth to descend.
    #[builder(default = "MAX_DIRECTORY_DEPTH")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of files to record.
    #[builder(default = "MAX_FILES")]
    #[serde(default = "default_max_files")]
    pub max_files: u64,

    /// Maximum total bytes to record.
    #[builder(default = "MAX_TOTAL_SIZE_BYTES")]
    #[serde(default = "default_max_total_size")]
    pub max_total_size: u64,

    /// Per-file byte cap for content extraction. Larger text files stay
    /// visible in statistics but their content is not read.
    #[builder(default = "DEFAULT_MAX_FILE_SIZE")]
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_max_depth() -> u32 {
    MAX_DIRECTORY_DEPTH
}

fn default_max_files() -> u64 {
    MAX_FILES
}

fn default_max_total_size() -> u64 {
    MAX_TOTAL_SIZE_BYTES
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config with default budgets for a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: FilterSpec::pass_all(),
            max_depth: MAX_DIRECTORY_DEPTH,
            max_files: MAX_FILES,
            max_total_size: MAX_TOTAL_SIZE_BYTES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
