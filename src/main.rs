//! dedupest - estimate space savings from fixed-size-block deduplication.
//!
//! Usage:
//!   dedupest <BLOCK_SIZE> <PATH>      Scan PATH and report dedup potential
//!   dedupest --format json ...        Emit the summary as JSON
//!   dedupest -v ...                   Log per-file progress and failures
//!   dedupest --help                   Show help

mod report;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::EnvFilter;

use dedupest_analyze::DedupEstimator;
use dedupest_core::{BLOCK_ALIGNMENT, RunConfig};
use dedupest_scan::JwalkEnumerator;

#[derive(Parser)]
#[command(
    name = "dedupest",
    version,
    about = "Estimate space savings from fixed-size-block deduplication",
    long_about = "dedupest splits every file under PATH into BLOCK_SIZE-byte blocks,\n\
                  fingerprints each block, and reports how much of the tree is\n\
                  duplicated block content. It is a read-only estimator: nothing\n\
                  is written, moved, or reclaimed."
)]
struct Cli {
    /// Block size in bytes (positive multiple of 512)
    #[arg(value_parser = parse_block_size)]
    block_size: u64,

    /// Directory to analyze
    path: PathBuf,

    /// Log per-file progress and failures to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Number of hashing threads (0 = auto-detect)
    #[arg(short, long, default_value = "0")]
    threads: usize,

    /// Follow symbolic links during enumeration
    #[arg(long)]
    follow_symlinks: bool,

    /// Name patterns to skip (repeatable, e.g. --ignore node_modules --ignore '*.log')
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_block_size(s: &str) -> Result<u64, String> {
    let block_size: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid byte count"))?;
    if !RunConfig::is_valid_block_size(block_size) {
        return Err(format!(
            "block size must be a positive multiple of {BLOCK_ALIGNMENT}, got {block_size}"
        ));
    }
    Ok(block_size)
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::builder()
        .root(cli.path)
        .block_size(cli.block_size)
        .follow_symlinks(cli.follow_symlinks)
        .ignore_patterns(cli.ignore_patterns)
        .threads(cli.threads)
        .build()
        .map_err(|e| eyre!(e.to_string()))?;

    eprintln!("Scanning {}...", config.root.display());

    let walked = JwalkEnumerator::new()
        .enumerate(&config)
        .context("Enumeration failed")?;

    eprintln!(
        "Hashing {} files in {}-byte blocks...",
        walked.files.len(),
        config.block_size
    );

    let estimator = DedupEstimator::with_config(config);
    let summary = estimator.estimate(&walked.files);

    match cli.format {
        OutputFormat::Text => report::render_text(&walked.root, &summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
