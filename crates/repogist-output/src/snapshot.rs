//! Snapshot assembly: content blob, summary, repository identifier.

use serde::{Deserialize, Serialize};
use tracing::debug;

use repogist_core::{FilterSpec, ScanConfig, ScanError, ScanTree};

use crate::extract::{ContentExtractor, ExtractedFile};
use crate::render::render_tree;
use crate::tokens::{format_token_count, TokenEstimator};

/// Fixed 48-character delimiter between file blocks.
const SEPARATOR: &str = "================================================";

/// Summary statistics attached to a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Repository identifier derived from the source URL (`owner/repo`).
    pub repository: String,
    /// Number of files whose content made it into the blob.
    pub files_analyzed: u64,
    /// Best-effort formatted token estimate; absent when unavailable.
    pub estimated_tokens: Option<String>,
}

/// The complete result of one scan-and-render operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Rendered directory tree, prefixed with a `Directory structure:` header.
    pub tree: String,
    /// Concatenated file contents with per-file delimiters.
    pub content: String,
    /// Summary statistics.
    pub summary: SnapshotSummary,
}

impl Snapshot {
    /// Render the summary as display text.
    ///
    /// Pattern information is listed only when the caller supplied explicit
    /// patterns; the token estimate line is appended when available.
    pub fn summary_text(&self, filter: Option<&FilterSpec>) -> String {
        let mut parts = vec![
            format!("Repository: {}", self.summary.repository),
            format!("Files analyzed: {}", self.summary.files_analyzed),
        ];

        if let Some(spec) = filter {
            if !spec.is_empty() {
                parts.push(format!("Pattern type: {}", spec.mode));
                parts.push("Applied patterns:".to_string());
                for pattern in &spec.patterns {
                    parts.push(format!("  - {pattern}"));
                }
            }
        }

        if let Some(tokens) = &self.summary.estimated_tokens {
            parts.push(format!("Estimated tokens: {tokens}"));
        }

        parts.join("\n")
    }
}

/// Build a full snapshot from a finished scan tree.
///
/// The tree rendering and the content extraction are independent read-only
/// projections of the same tree and run in parallel.
pub fn build_snapshot(
    tree: &ScanTree,
    config: &ScanConfig,
    source_url: Option<&str>,
    estimator: Option<&dyn TokenEstimator>,
) -> Result<Snapshot, ScanError> {
    let extractor = ContentExtractor::new(&config.filter, config.max_file_size)?;

    let (tree_text, files) = rayon::join(
        || render_tree(&tree.root),
        || extractor.extract(&tree.root, &tree.root_path),
    );

    let content = assemble_content(&files);
    let files_analyzed = files.iter().filter(|f| f.content.is_some()).count() as u64;
    let repository = match source_url {
        Some(url) => repository_identifier(url),
        None => tree.root.name.to_string(),
    };
    let estimated_tokens = estimator
        .and_then(|e| e.estimate(&content))
        .map(format_token_count);

    debug!(
        files_extracted = files.len(),
        files_analyzed, "snapshot assembled"
    );

    Ok(Snapshot {
        tree: format!("Directory structure:\n{tree_text}"),
        content,
        summary: SnapshotSummary {
            repository,
            files_analyzed,
            estimated_tokens,
        },
    })
}

/// Concatenate extracted file bodies into one delimited blob.
///
/// Files with absent content contribute nothing, not even a placeholder.
pub fn assemble_content(files: &[ExtractedFile]) -> String {
    let mut output = String::new();
    for file in files {
        let Some(content) = &file.content else {
            continue;
        };
        output.push_str(SEPARATOR);
        output.push('\n');
        output.push_str("File: ");
        output.push_str(&file.relative_path);
        output.push('\n');
        output.push_str(SEPARATOR);
        output.push('\n');
        output.push_str(content);
        output.push_str("\n\n");
    }
    output
}

/// Derive a repository identifier from a source URL.
///
/// Uses the `owner/repo` path segments with a trailing `.git` stripped,
/// falling back to the URL's basename when the path has too few segments.
pub fn repository_identifier(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let rest = trimmed.split_once("://").map_or(trimmed, |(_, r)| r);
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() >= 3 {
        let owner = segments[1];
        let repo = segments[2];
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        return format!("{owner}/{repo}");
    }

    let base = segments.last().copied().unwrap_or(trimmed);
    base.strip_suffix(".git").unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(path: &str, content: Option<&str>) -> ExtractedFile {
        ExtractedFile {
            relative_path: path.to_string(),
            content: content.map(|s| s.to_string()),
            size: content.map_or(10_000, |s| s.len() as u64),
        }
    }

    #[test]
    fn test_assemble_skips_absent_content() {
        let files = vec![extracted("a.txt", Some("hi")), extracted("b.txt", None)];
        let blob = assemble_content(&files);

        assert_eq!(blob.matches("File: a.txt").count(), 1);
        assert!(!blob.contains("b.txt"));
        assert!(blob.contains("hi\n\n"));
    }

    #[test]
    fn test_separator_is_48_chars() {
        assert_eq!(SEPARATOR.len(), 48);
        assert!(SEPARATOR.chars().all(|c| c == '='));
    }

    #[test]
    fn test_block_layout() {
        let files = vec![extracted("src/a.py", Some("print(1)"))];
        let blob = assemble_content(&files);
        let expected = format!("{SEPARATOR}\nFile: src/a.py\n{SEPARATOR}\nprint(1)\n\n");
        assert_eq!(blob, expected);
    }

    #[test]
    fn test_repository_identifier_from_https_url() {
        assert_eq!(
            repository_identifier("https://github.com/owner/repo"),
            "owner/repo"
        );
        assert_eq!(
            repository_identifier("https://github.com/owner/repo.git"),
            "owner/repo"
        );
        assert_eq!(
            repository_identifier("https://github.com/owner/repo/"),
            "owner/repo"
        );
    }

    #[test]
    fn test_repository_identifier_ignores_extra_segments() {
        assert_eq!(
            repository_identifier("https://github.com/owner/repo/tree/main"),
            "owner/repo"
        );
    }

    #[test]
    fn test_repository_identifier_fallback_to_basename() {
        assert_eq!(repository_identifier("repo.git"), "repo");
        assert_eq!(repository_identifier("some/repo"), "repo");
    }

    #[test]
    fn test_summary_text_with_patterns() {
        let snapshot = Snapshot {
            tree: String::new(),
            content: String::new(),
            summary: SnapshotSummary {
                repository: "owner/repo".to_string(),
                files_analyzed: 2,
                estimated_tokens: Some("1.2k".to_string()),
            },
        };
        let spec = FilterSpec::new(
            vec!["*.py".to_string()],
            repogist_core::PatternMode::Include,
        );
        let text = snapshot.summary_text(Some(&spec));

        assert!(text.starts_with("Repository: owner/repo\nFiles analyzed: 2"));
        assert!(text.contains("Pattern type: include"));
        assert!(text.contains("  - *.py"));
        assert!(text.ends_with("Estimated tokens: 1.2k"));
    }

    #[test]
    fn test_summary_text_without_patterns() {
        let snapshot = Snapshot {
            tree: String::new(),
            content: String::new(),
            summary: SnapshotSummary {
                repository: "r".to_string(),
                files_analyzed: 0,
                estimated_tokens: None,
            },
        };
        let text = snapshot.summary_text(Some(&FilterSpec::pass_all()));
        assert_eq!(text, "Repository: r\nFiles analyzed: 0");
    }
}
