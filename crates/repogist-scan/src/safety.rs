//! Canonical-path safety checks and duplicate suppression.

use std::path::{Path, PathBuf};

use dashmap::DashSet;
use tracing::debug;

use repogist_core::ScanError;

/// Decides whether a candidate filesystem entry is safe and new to visit.
///
/// Holds the canonicalized scan root and a visited-set of canonical paths
/// scoped to one scan invocation. Symlinks whose targets resolve outside
/// the root are rejected; a canonical path is admitted at most once, which
/// terminates symlink cycles and suppresses hard-linked duplicates. The
/// check-then-insert on the visited-set is a single atomic operation.
#[derive(Debug)]
pub struct PathSafetyGuard {
    canonical_root: PathBuf,
    visited: DashSet<PathBuf>,
}

impl PathSafetyGuard {
    /// Create a guard for a scan root. Fails if the root cannot be resolved.
    pub fn new(root: &Path) -> Result<Self, ScanError> {
        let canonical_root = root.canonicalize().map_err(|e| ScanError::io(root, e))?;
        Ok(Self {
            canonical_root,
            visited: DashSet::new(),
        })
    }

    /// The canonicalized scan root.
    pub fn canonical_root(&self) -> &Path {
        &self.canonical_root
    }

    /// Record a visit to `path`'s canonical form.
    ///
    /// Returns `true` on first acceptance. Returns `false` if the canonical
    /// path was already recorded, or if resolution fails (broken link,
    /// permission) — both mean "skip this entry".
    pub fn first_visit(&self, path: &Path) -> bool {
        match path.canonicalize() {
            Ok(real) => self.visited.insert(real),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "failed to resolve path, skipping");
                false
            }
        }
    }

    /// Check whether a symlink's target resolves inside the scan root.
    ///
    /// Resolution errors count as unsafe.
    pub fn is_safe_symlink(&self, path: &Path) -> bool {
        match path.canonicalize() {
            Ok(target) => target.starts_with(&self.canonical_root),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "failed to resolve symlink target");
                false
            }
        }
    }

    /// Check whether `path`'s canonical form was already recorded, without
    /// recording it. Resolution errors count as visited (skip).
    pub fn already_visited(&self, path: &Path) -> bool {
        match path.canonicalize() {
            Ok(real) => self.visited.contains(&real),
            Err(_) => true,
        }
    }

    /// Number of canonical paths recorded so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
