//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress information broadcast periodically during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of files recorded so far.
    pub files_scanned: u64,
    /// Total bytes recorded so far.
    pub bytes_scanned: u64,
    /// Path being scanned when this update was emitted.
    pub current_path: PathBuf,
    /// Number of warnings recorded so far.
    pub warnings_count: u64,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_scanned: 0,
            bytes_scanned: 0,
            current_path: PathBuf::new(),
            warnings_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_per_second() {
        let progress = ScanProgress {
            files_scanned: 100,
            bytes_scanned: 4096,
            current_path: PathBuf::from("/repo/src"),
            warnings_count: 0,
            elapsed: Duration::from_secs(2),
        };
        assert!((progress.files_per_second() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_elapsed() {
        let progress = ScanProgress::new();
        assert_eq!(progress.files_per_second(), 0.0);
    }
}
