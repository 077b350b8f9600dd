//! Second-pass content extraction over a finished scan tree.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use repogist_core::{FilterSpec, NodeKind, ScanError, ScanNode};
use repogist_scan::{is_builtin_ignored, GlobFilter};

/// One file selected for the content blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFile {
    /// Path relative to the scan root.
    pub relative_path: String,
    /// File body, or `None` when the file exceeded the per-file size cap.
    pub content: Option<String>,
    /// Size in bytes.
    pub size: u64,
}

/// Walks a finished scan tree and pulls text-file bodies.
///
/// Runs independently of the tree scan so it can additionally apply the
/// built-in ignore list without removing those paths from the rendered
/// tree. Binary files are dropped entirely; text files over the size cap
/// are recorded with absent content so they stay visible in statistics.
pub struct ContentExtractor {
    filter: GlobFilter,
    max_file_size: u64,
}

impl ContentExtractor {
    /// Compile the user filter. Fails on an invalid glob pattern.
    pub fn new(spec: &FilterSpec, max_file_size: u64) -> Result<Self, ScanError> {
        Ok(Self {
            filter: GlobFilter::new(spec)?,
            max_file_size,
        })
    }

    /// Extract file bodies depth-first, following the tree's child order.
    pub fn extract(&self, root: &ScanNode, base_path: &Path) -> Vec<ExtractedFile> {
        let mut files = Vec::new();
        self.extract_node(root, base_path, &mut files);
        files
    }

    fn extract_node(&self, node: &ScanNode, base_path: &Path, files: &mut Vec<ExtractedFile>) {
        match &node.kind {
            NodeKind::File => {
                let rel_path = node.path.strip_prefix(base_path).unwrap_or(&node.path);

                // Built-in ignore list first, then the user filter. A path
                // rejected here is not even classified as text or binary.
                if is_builtin_ignored(rel_path) {
                    debug!(path = %rel_path.display(), "built-in ignore, skipping");
                    return;
                }
                if !self.filter.should_process(rel_path) {
                    return;
                }
                if !is_text_file(&node.path) {
                    debug!(path = %rel_path.display(), "binary file, skipping");
                    return;
                }

                let content = if node.size <= self.max_file_size {
                    Some(read_file_content(&node.path))
                } else {
                    debug!(
                        path = %rel_path.display(),
                        size = node.size,
                        cap = self.max_file_size,
                        "file exceeds size cap, recording without content"
                    );
                    None
                };
                files.push(ExtractedFile {
                    relative_path: rel_path.to_string_lossy().into_owned(),
                    content,
                    size: node.size,
                });
            }
            NodeKind::Directory {
                children,
                ignore_content,
                ..
            } => {
                if *ignore_content {
                    return;
                }
                for child in children {
                    self.extract_node(child, base_path, files);
                }
            }
        }
    }
}

/// Classify a file as text by inspecting its first 1 KiB.
///
/// Text means every byte is a common control character (BEL, BS, tab,
/// newline, form feed, carriage return, escape) or printable (>= 0x20).
/// Unreadable files count as binary.
pub fn is_text_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut chunk = [0u8; 1024];
    let read = match file.read(&mut chunk) {
        Ok(read) => read,
        Err(_) => return false,
    };
    chunk[..read]
        .iter()
        .all(|&b| matches!(b, 7 | 8 | 9 | 10 | 12 | 13 | 27) || b >= 0x20)
}

/// Read a file as UTF-8 with invalid bytes replaced.
///
/// A read failure mid-extraction yields a placeholder body rather than
/// aborting the whole operation.
fn read_file_content(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => format!("Error reading file: {err}"),
    }
}
