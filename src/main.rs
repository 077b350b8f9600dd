//! repogist - turn a repository checkout into an LLM-ready text snapshot.
//!
//! Usage:
//!   repogist [PATH]                       Snapshot the checkout at PATH
//!   repogist [PATH] -p "*.py" -m include  Only files matching the patterns
//!   repogist [PATH] --format json         Machine-readable snapshot
//!   repogist --help                       Show help

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};

use repogist_core::{FilterSpec, PatternMode, ScanConfig};
use repogist_output::{build_snapshot, CharRatioEstimator, TokenEstimator};
use repogist_scan::TreeScanner;

#[derive(Parser)]
#[command(
    name = "repogist",
    version,
    about = "Turn a repository checkout into a bounded, LLM-ready text snapshot",
    long_about = "repogist scans an already-cloned repository, renders its \
                  directory tree, and concatenates the text files that pass \
                  the filters into a single delimited blob."
)]
struct Cli {
    /// Path to the local checkout to snapshot
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Original repository URL, used only for the summary identifier
    #[arg(long)]
    url: Option<String>,

    /// Comma-separated glob patterns for filtering files
    #[arg(short, long)]
    pattern: Option<String>,

    /// How the patterns are interpreted
    #[arg(short = 'm', long, default_value = "exclude")]
    pattern_mode: PatternModeArg,

    /// Per-file size cap in bytes for content inclusion
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Print only the rendered tree, skipping the content blob
    #[arg(long)]
    tree_only: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum PatternModeArg {
    Include,
    #[default]
    Exclude,
}

impl From<PatternModeArg> for PatternMode {
    fn from(mode: PatternModeArg) -> Self {
        match mode {
            PatternModeArg::Include => PatternMode::Include,
            PatternModeArg::Exclude => PatternMode::Exclude,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.path.canonicalize().context("Invalid path")?;

    let patterns: Vec<String> = cli
        .pattern
        .as_deref()
        .map(|p| {
            p.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let filter = FilterSpec::new(patterns, cli.pattern_mode.into());

    let mut builder = ScanConfig::builder();
    builder.root(&path).filter(filter.clone());
    if let Some(cap) = cli.max_file_size {
        builder.max_file_size(cap);
    }
    let config = builder.build().map_err(|e| color_eyre::eyre::eyre!(e))?;

    tracing::info!(path = %path.display(), "starting scan");
    let scanner = TreeScanner::new();
    let tree = scanner.scan(&config).context("Scan failed")?;

    let estimator = CharRatioEstimator::default();
    let snapshot = build_snapshot(
        &tree,
        &config,
        cli.url.as_deref(),
        Some(&estimator as &dyn TokenEstimator),
    )
    .context("Snapshot assembly failed")?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", snapshot.summary_text(Some(&filter)));
            println!();
            println!("{}", snapshot.tree);
            if !cli.tree_only {
                print!("{}", snapshot.content);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    eprintln!(
        "Scanned {} files, {} directories ({}) in {:.2}s",
        tree.total_files(),
        tree.total_dirs(),
        format_size(tree.total_size()),
        tree.scan_duration.as_secs_f64()
    );
    if tree.has_warnings() {
        eprintln!("{} warning(s) during scan", tree.warnings.len());
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
