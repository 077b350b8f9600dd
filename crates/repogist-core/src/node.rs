//! File and directory node types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// What a node is, plus the payload that only exists for that kind.
///
/// Files never carry children; directories carry their children together
/// with recursive aggregate counts. Matching on this enum is how the
/// renderer and the extractor stay exhaustive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file (or a symlink that resolved to one inside the root).
    File,
    /// Directory.
    Directory {
        /// Child nodes, in display order once the scan has finished.
        children: Vec<ScanNode>,
        /// Total number of files in this subtree (recursive).
        file_count: u64,
        /// Total number of directories in this subtree (recursive, excluding self).
        dir_count: u64,
        /// Skip this subtree during content extraction while still
        /// showing it in the rendered tree. Reserved for future filter
        /// classes; defaults to false.
        ignore_content: bool,
    },
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or directory discovered by a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanNode {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Absolute filesystem path.
    pub path: PathBuf,

    /// Size in bytes (sum of descendant file sizes for directories).
    pub size: u64,

    /// Node kind and kind-specific payload.
    pub kind: NodeKind,
}

impl ScanNode {
    /// Create a new file node.
    pub fn new_file(name: impl Into<CompactString>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
            kind: NodeKind::File,
        }
    }

    /// Create a new, empty directory node.
    pub fn new_directory(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: 0,
            kind: NodeKind::Directory {
                children: Vec::new(),
                file_count: 0,
                dir_count: 0,
                ignore_content: false,
            },
        }
    }

    /// Create a directory node from already-accumulated contents.
    pub fn directory(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        size: u64,
        children: Vec<ScanNode>,
        file_count: u64,
        dir_count: u64,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
            kind: NodeKind::Directory {
                children,
                file_count,
                dir_count,
                ignore_content: false,
            },
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Child nodes (empty slice for files).
    pub fn children(&self) -> &[ScanNode] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::File => &[],
        }
    }

    /// Recursive file count: aggregate for directories, 1 for files.
    pub fn file_count(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { file_count, .. } => *file_count,
            NodeKind::File => 1,
        }
    }

    /// Recursive directory count (0 for files, excludes self).
    pub fn dir_count(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { dir_count, .. } => *dir_count,
            NodeKind::File => 0,
        }
    }

    /// Sort this directory's immediate children into display order.
    ///
    /// Grouping: `README.md` (case-insensitive) first, then regular files,
    /// dot-prefixed files, regular directories, dot-prefixed directories.
    /// Groups after the first are sorted alphabetically by name.
    pub fn sort_children(&mut self) {
        if let NodeKind::Directory { children, .. } = &mut self.kind {
            children.sort_by(|a, b| {
                display_group(a)
                    .cmp(&display_group(b))
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }
}

/// Display-order group index for a child node. Lower renders first.
fn display_group(node: &ScanNode) -> u8 {
    match (&node.kind, node.name.as_str()) {
        (NodeKind::File, name) if name.eq_ignore_ascii_case("readme.md") => 0,
        (NodeKind::File, name) if !name.starts_with('.') => 1,
        (NodeKind::File, _) => 2,
        (NodeKind::Directory { .. }, name) if !name.starts_with('.') => 3,
        (NodeKind::Directory { .. }, _) => 4,
    }
}
