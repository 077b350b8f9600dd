//! Recursive, budget-enforcing directory scanner.

use std::path::Path;
use std::time::Instant;

use compact_str::CompactString;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use repogist_core::{
    ScanConfig, ScanError, ScanNode, ScanStats, ScanTree, ScanWarning, WarningKind,
};

use crate::filter::GlobFilter;
use crate::progress::ScanProgress;
use crate::safety::PathSafetyGuard;

/// Emit a progress update every this many files.
const PROGRESS_INTERVAL: u64 = 1000;

/// Immutable per-scan state threaded through the recursion.
struct ScanCtx<'a> {
    base: &'a Path,
    config: &'a ScanConfig,
    filter: GlobFilter,
    guard: PathSafetyGuard,
    start: Instant,
}

/// Depth-first scanner producing a bounded [`ScanTree`].
///
/// The traversal is sequential: one `ScanStats` and one visited-set are
/// owned by each `scan` call and threaded through its recursion, so budget
/// checks observe one update at a time. Independent scans share nothing.
pub struct TreeScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan the configured root and build the node tree.
    ///
    /// Soft conditions (permission denied, unsafe symlinks, budget ceilings)
    /// prune entries and are recorded as warnings; they never fail the scan.
    /// A root that does not exist, is not a directory, or yields no nodes is
    /// a hard error.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanTree, ScanError> {
        let root = &config.root;
        let metadata = std::fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root.clone() });
        }

        let ctx = ScanCtx {
            base: root,
            config,
            filter: GlobFilter::new(&config.filter)?,
            guard: PathSafetyGuard::new(root)?,
            start: Instant::now(),
        };
        let mut stats = ScanStats::new();
        let mut warnings = Vec::new();

        let node = self.scan_directory(root, 0, &ctx, &mut stats, &mut warnings)?;
        let node = node
            .filter(|n| !n.children().is_empty())
            .ok_or_else(|| ScanError::NothingToScan { path: root.clone() })?;

        debug!(
            files = stats.total_files,
            bytes = stats.total_size,
            warnings = warnings.len(),
            "scan finished"
        );
        Ok(ScanTree::new(node, root.clone(), ctx.start.elapsed(), warnings))
    }

    /// Scan one directory. Returns `Ok(None)` to prune this subtree.
    fn scan_directory(
        &self,
        path: &Path,
        depth: u32,
        ctx: &ScanCtx<'_>,
        stats: &mut ScanStats,
        warnings: &mut Vec<ScanWarning>,
    ) -> Result<Option<ScanNode>, ScanError> {
        // Budget checks, in order, before touching the directory.
        if depth > ctx.config.max_depth {
            debug!(path = %path.display(), max_depth = ctx.config.max_depth, "skipping deep directory");
            warnings.push(ScanWarning::new(
                path,
                format!("Max depth {} reached", ctx.config.max_depth),
                WarningKind::DepthLimit,
            ));
            return Ok(None);
        }
        if stats.total_files >= ctx.config.max_files {
            debug!(path = %path.display(), max_files = ctx.config.max_files, "file limit reached, pruning");
            warnings.push(ScanWarning::new(
                path,
                format!("Max file limit {} reached", ctx.config.max_files),
                WarningKind::FileLimit,
            ));
            return Ok(None);
        }
        if stats.total_size >= ctx.config.max_total_size {
            debug!(path = %path.display(), max_total_size = ctx.config.max_total_size, "size limit reached, pruning");
            warnings.push(ScanWarning::new(
                path,
                format!("Max total size {} reached", ctx.config.max_total_size),
                WarningKind::SizeLimit,
            ));
            return Ok(None);
        }
        if !ctx.guard.first_visit(path) {
            debug!(path = %path.display(), "skipping already visited path");
            warnings.push(ScanWarning::already_visited(path));
            return Ok(None);
        }

        let name = directory_name(path);
        let mut children: Vec<ScanNode> = Vec::new();
        let mut size: u64 = 0;
        let mut file_count: u64 = 0;
        let mut dir_count: u64 = 0;

        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                warn!(path = %path.display(), "permission denied, skipping directory");
                warnings.push(ScanWarning::permission_denied(path));
                return Ok(None);
            }
            Err(err) => return Err(ScanError::io(path, err)),
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warnings.push(ScanWarning::read_error(path, &err));
                    continue;
                }
            };
            let item_path = entry.path();
            let rel_path = item_path.strip_prefix(ctx.base).unwrap_or(&item_path);

            // Filter patterns are root-relative regardless of nesting depth.
            if !ctx.filter.should_process(rel_path) {
                continue;
            }

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warnings.push(ScanWarning::read_error(&item_path, &err));
                    continue;
                }
            };
            if file_type.is_symlink() {
                if !ctx.guard.is_safe_symlink(&item_path) {
                    warn!(path = %item_path.display(), "skipping symlink pointing outside the scan root");
                    warnings.push(ScanWarning::unsafe_symlink(&item_path));
                    continue;
                }
                if ctx.guard.already_visited(&item_path) {
                    debug!(path = %item_path.display(), "skipping already visited symlink target");
                    warnings.push(ScanWarning::already_visited(&item_path));
                    continue;
                }
            }

            // Classify through the symlink, matching the safety check above.
            let metadata = match std::fs::metadata(&item_path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    debug!(path = %item_path.display(), error = %err, "failed to stat entry, skipping");
                    warnings.push(ScanWarning::read_error(&item_path, &err));
                    continue;
                }
            };

            if metadata.is_file() {
                let file_size = metadata.len();
                if stats.would_exceed_size(file_size, ctx.config.max_total_size) {
                    debug!(path = %item_path.display(), size = file_size, "skipping file: would exceed total size limit");
                    warnings.push(ScanWarning::new(
                        &item_path,
                        "File would exceed total size limit",
                        WarningKind::SizeLimit,
                    ));
                    continue;
                }

                stats.record_file(file_size);
                if stats.total_files > ctx.config.max_files {
                    // Partial results are valid: stop enumerating and hand
                    // back what this directory has so far.
                    warn!(max_files = ctx.config.max_files, "maximum file limit reached");
                    warnings.push(ScanWarning::new(
                        &item_path,
                        format!("Max file limit {} reached", ctx.config.max_files),
                        WarningKind::FileLimit,
                    ));
                    return Ok(Some(ScanNode::directory(
                        name, path, size, children, file_count, dir_count,
                    )));
                }

                let file_name = CompactString::new(entry.file_name().to_string_lossy());
                children.push(ScanNode::new_file(file_name, &item_path, file_size));
                size += file_size;
                file_count += 1;

                if stats.total_files % PROGRESS_INTERVAL == 0 {
                    let _ = self.progress_tx.send(ScanProgress {
                        files_scanned: stats.total_files,
                        bytes_scanned: stats.total_size,
                        current_path: item_path.clone(),
                        warnings_count: warnings.len() as u64,
                        elapsed: ctx.start.elapsed(),
                    });
                }
            } else if metadata.is_dir() {
                if let Some(subdir) =
                    self.scan_directory(&item_path, depth + 1, ctx, stats, warnings)?
                {
                    size += subdir.size;
                    file_count += subdir.file_count();
                    dir_count += 1 + subdir.dir_count();
                    children.push(subdir);
                }
            }
            // Sockets, devices and the like are skipped.
        }

        let mut node = ScanNode::directory(name, path, size, children, file_count, dir_count);
        node.sort_children();
        Ok(Some(node))
    }
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Basename of a directory, falling back to the full path display.
fn directory_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}
