//! Glob-based path filtering.
//!
//! Two independent layers: the user-supplied [`FilterSpec`] compiled into a
//! [`GlobFilter`], applied during both tree scan and content extraction, and
//! a fixed built-in ignore list applied only during content extraction. The
//! rendered tree may therefore show a path that the content blob excludes.

use std::path::Path;
use std::sync::OnceLock;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use repogist_core::{FilterSpec, PatternMode, ScanError};

/// Directories always excluded from content extraction: VCS metadata,
/// dependency and cache trees, editor state, build output.
const IGNORED_DIRECTORIES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".bzr",
    "node_modules",
    "bower_components",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".tox",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
    ".cache",
    "dist",
    "build",
    "coverage",
];

/// Files always excluded from content extraction: OS and editor artifacts.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Glob patterns always excluded from content extraction.
const IGNORED_GLOBS: &[&str] = &["*.pyc", "*.pyo", "*.class", "*.swp", "*.swo"];

/// A compiled filter: user patterns plus the mode they run under.
#[derive(Debug)]
pub struct GlobFilter {
    set: GlobSet,
    mode: PatternMode,
    empty: bool,
}

impl GlobFilter {
    /// Compile a filter spec. Fails on an invalid glob pattern.
    pub fn new(spec: &FilterSpec) -> Result<Self, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &spec.patterns {
            let glob = GlobBuilder::new(pattern)
                // Shell-style matching: `*` crosses `/`, patterns apply to
                // the whole root-relative path.
                .literal_separator(false)
                .build()
                .map_err(|e| ScanError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| ScanError::InvalidPattern {
            pattern: spec.patterns.join(","),
            message: e.to_string(),
        })?;
        Ok(Self {
            set,
            mode: spec.mode,
            empty: spec.patterns.is_empty(),
        })
    }

    /// Decide whether a root-relative path passes this filter.
    ///
    /// No patterns passes everything. Under `Include` a path passes when
    /// any pattern matches; under `Exclude` when none does.
    pub fn should_process(&self, rel_path: &Path) -> bool {
        if self.empty {
            return true;
        }
        let matched = self.set.is_match(rel_path);
        match self.mode {
            PatternMode::Include => matched,
            PatternMode::Exclude => !matched,
        }
    }
}

/// Check a root-relative path against the built-in ignore list.
///
/// Always runs in exclude mode and is evaluated before the user filter;
/// not overridable.
pub fn is_builtin_ignored(rel_path: &Path) -> bool {
    builtin_ignore_set().is_match(rel_path)
}

fn builtin_ignore_set() -> &'static GlobSet {
    static SET: OnceLock<GlobSet> = OnceLock::new();
    SET.get_or_init(|| {
        let mut builder = GlobSetBuilder::new();
        let mut add = |pattern: &str| {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .build()
                .expect("built-in ignore pattern must compile");
            builder.add(glob);
        };
        for dir in IGNORED_DIRECTORIES {
            add(&format!("{dir}/*"));
            add(&format!("*/{dir}/*"));
        }
        for file in IGNORED_FILES {
            add(file);
            add(&format!("*/{file}"));
        }
        for glob in IGNORED_GLOBS {
            add(glob);
        }
        builder.build().expect("built-in ignore set must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn filter(patterns: &[&str], mode: PatternMode) -> GlobFilter {
        let spec = FilterSpec::new(patterns.iter().map(|s| s.to_string()).collect(), mode);
        GlobFilter::new(&spec).unwrap()
    }

    #[test]
    fn test_empty_patterns_pass_everything() {
        let f = filter(&[], PatternMode::Exclude);
        assert!(f.should_process(Path::new("src/a.py")));

        let f = filter(&[], PatternMode::Include);
        assert!(f.should_process(Path::new("src/a.py")));
    }

    #[test]
    fn test_include_mode() {
        let f = filter(&["*.py"], PatternMode::Include);
        assert!(f.should_process(Path::new("src/a.py")));
        assert!(!f.should_process(Path::new("src/a.rs")));
    }

    #[test]
    fn test_exclude_mode() {
        let f = filter(&["*.py"], PatternMode::Exclude);
        assert!(!f.should_process(Path::new("src/a.py")));
        assert!(f.should_process(Path::new("src/a.rs")));
    }

    #[test]
    fn test_star_crosses_separators() {
        // fnmatch semantics: `*.py` matches nested paths too.
        let f = filter(&["*.py"], PatternMode::Include);
        assert!(f.should_process(Path::new("deep/nested/dir/a.py")));
    }

    #[test]
    fn test_directory_pattern() {
        let f = filter(&["tests/*"], PatternMode::Exclude);
        assert!(!f.should_process(Path::new("tests/test_a.py")));
        assert!(f.should_process(Path::new("src/main.py")));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let spec = FilterSpec::new(vec!["[".to_string()], PatternMode::Include);
        assert!(matches!(
            GlobFilter::new(&spec),
            Err(ScanError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_builtin_ignores_vcs_and_deps() {
        assert!(is_builtin_ignored(Path::new(".git/config")));
        assert!(is_builtin_ignored(Path::new("node_modules/x.js")));
        assert!(is_builtin_ignored(Path::new("pkg/node_modules/y/z.js")));
        assert!(is_builtin_ignored(Path::new("src/__pycache__/mod.cpython-311.pyc")));
        assert!(is_builtin_ignored(Path::new(".DS_Store")));
        assert!(is_builtin_ignored(Path::new("docs/.DS_Store")));
    }

    #[test]
    fn test_builtin_keeps_source_files() {
        assert!(!is_builtin_ignored(Path::new("README.md")));
        assert!(!is_builtin_ignored(Path::new("src/main.py")));
        assert!(!is_builtin_ignored(Path::new("gitignore_parser.py")));
        assert!(!is_builtin_ignored(Path::new("builder/build.rs")));
    }
}
