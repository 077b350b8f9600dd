use std::fs;

use tempfile::TempDir;

use repogist_core::{FilterSpec, PatternMode, ScanConfig};
use repogist_output::{build_snapshot, render_tree, TokenEstimator};
use repogist_scan::TreeScanner;

fn fixture_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("src")).unwrap();
    fs::create_dir(root.join(".git")).unwrap();
    fs::create_dir(root.join("node_modules")).unwrap();

    fs::write(root.join("README.md"), "# X").unwrap();
    fs::write(root.join("src/main.py"), "print(1)").unwrap();
    fs::write(root.join(".git/config"), "[core]\n").unwrap();
    fs::write(root.join("node_modules/x.js"), "module.exports = 1\n").unwrap();

    temp
}

struct FixedEstimator(u64);

impl TokenEstimator for FixedEstimator {
    fn estimate(&self, _text: &str) -> Option<u64> {
        Some(self.0)
    }
}

struct FailingEstimator;

impl TokenEstimator for FailingEstimator {
    fn estimate(&self, _text: &str) -> Option<u64> {
        None
    }
}

#[test]
fn test_end_to_end_tree_and_content_diverge() {
    let temp = fixture_repo();
    let mut config = ScanConfig::new(temp.path());
    config.max_file_size = 1024;

    let tree = TreeScanner::new().scan(&config).unwrap();
    let snapshot = build_snapshot(&tree, &config, None, None).unwrap();

    // The rendered tree lists all four entries, ignore list included.
    assert!(snapshot.tree.starts_with("Directory structure:\n"));
    assert!(snapshot.tree.contains("README.md"));
    assert!(snapshot.tree.contains("src/"));
    assert!(snapshot.tree.contains(".git/"));
    assert!(snapshot.tree.contains("node_modules/"));

    // The content blob excludes what the built-in ignore list rejects.
    assert!(snapshot.content.contains("File: README.md"));
    assert!(snapshot.content.contains("File: src/main.py"));
    assert!(snapshot.content.contains("# X"));
    assert!(snapshot.content.contains("print(1)"));
    assert!(!snapshot.content.contains(".git"));
    assert!(!snapshot.content.contains("node_modules"));

    assert_eq!(snapshot.summary.files_analyzed, 2);
    assert!(snapshot.summary.estimated_tokens.is_none());
}

#[test]
fn test_tree_ordering_in_rendered_text() {
    let temp = fixture_repo();
    let config = ScanConfig::new(temp.path());
    let tree = TreeScanner::new().scan(&config).unwrap();

    let text = render_tree(&tree.root);
    let readme = text.find("README.md").unwrap();
    let node_modules = text.find("node_modules/").unwrap();
    let src = text.find("src/").unwrap();
    let git = text.find(".git/").unwrap();
    assert!(readme < node_modules);
    assert!(node_modules < src);
    assert!(src < git);
}

#[test]
fn test_snapshots_are_idempotent() {
    let temp = fixture_repo();
    let config = ScanConfig::new(temp.path());

    let first_tree = TreeScanner::new().scan(&config).unwrap();
    let second_tree = TreeScanner::new().scan(&config).unwrap();

    let first = build_snapshot(&first_tree, &config, None, None).unwrap();
    let second = build_snapshot(&second_tree, &config, None, None).unwrap();

    assert_eq!(first.tree, second.tree);
    assert_eq!(first.content, second.content);
}

#[test]
fn test_size_cap_excludes_content_but_not_statistics() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("small.txt"), vec![b'a'; 64]).unwrap();
    fs::write(temp.path().join("big.txt"), vec![b'b'; 65]).unwrap();

    let config = ScanConfig::builder()
        .root(temp.path())
        .max_file_size(64u64)
        .build()
        .unwrap();
    let tree = TreeScanner::new().scan(&config).unwrap();
    let snapshot = build_snapshot(&tree, &config, None, None).unwrap();

    assert!(snapshot.content.contains("File: small.txt"));
    assert!(!snapshot.content.contains("big.txt"));
    assert_eq!(snapshot.summary.files_analyzed, 1);
    // The oversized file still exists in the scanned tree.
    assert_eq!(tree.total_files(), 2);
}

#[test]
fn test_user_filter_applies_to_both_projections() {
    let temp = fixture_repo();
    let config = ScanConfig::builder()
        .root(temp.path())
        .filter(FilterSpec::new(
            vec!["README*".to_string()],
            PatternMode::Exclude,
        ))
        .build()
        .unwrap();

    let tree = TreeScanner::new().scan(&config).unwrap();
    let snapshot = build_snapshot(&tree, &config, None, None).unwrap();

    assert!(!snapshot.tree.contains("README.md"));
    assert!(!snapshot.content.contains("README.md"));
    assert_eq!(snapshot.summary.files_analyzed, 1);
}

#[test]
fn test_repository_identifier_from_url() {
    let temp = fixture_repo();
    let config = ScanConfig::new(temp.path());
    let tree = TreeScanner::new().scan(&config).unwrap();

    let snapshot = build_snapshot(
        &tree,
        &config,
        Some("https://github.com/owner/repo.git"),
        None,
    )
    .unwrap();
    assert_eq!(snapshot.summary.repository, "owner/repo");

    // Without a URL the identifier falls back to the root basename.
    let snapshot = build_snapshot(&tree, &config, None, None).unwrap();
    assert_eq!(
        snapshot.summary.repository,
        tree.root_path.file_name().unwrap().to_string_lossy()
    );
}

#[test]
fn test_token_estimate_is_best_effort() {
    let temp = fixture_repo();
    let config = ScanConfig::new(temp.path());
    let tree = TreeScanner::new().scan(&config).unwrap();

    let snapshot =
        build_snapshot(&tree, &config, None, Some(&FixedEstimator(1_200_000))).unwrap();
    assert_eq!(snapshot.summary.estimated_tokens.as_deref(), Some("1.2M"));

    let snapshot = build_snapshot(&tree, &config, None, Some(&FailingEstimator)).unwrap();
    assert!(snapshot.summary.estimated_tokens.is_none());
}

#[test]
fn test_binary_files_never_reach_the_blob() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.txt"), "text").unwrap();
    fs::write(temp.path().join("image.png"), [0x89, b'P', b'N', b'G', 0x00]).unwrap();

    let config = ScanConfig::new(temp.path());
    let tree = TreeScanner::new().scan(&config).unwrap();
    let snapshot = build_snapshot(&tree, &config, None, None).unwrap();

    // The tree shows the binary, the blob does not.
    assert!(snapshot.tree.contains("image.png"));
    assert!(!snapshot.content.contains("image.png"));
    assert_eq!(snapshot.summary.files_analyzed, 1);
}
