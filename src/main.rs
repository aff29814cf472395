use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use preset_indexer::{run, IndexerConfig};

/// Build a semantic search index from UI-block preset files.
#[derive(Debug, Parser)]
#[command(name = "preset-indexer", version, about)]
struct Args {
    /// Directory containing block folders with preset files
    root: PathBuf,

    /// Output directory for the generated index
    #[arg(short, long, default_value = "dist/block-index")]
    out: PathBuf,

    /// JSON config file; missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process files on the current thread
    #[arg(long)]
    sequential: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => IndexerConfig::from_file(path)?,
        None => IndexerConfig::default(),
    };
    if args.sequential {
        config.parallel = false;
    }

    if !args.root.is_dir() {
        anyhow::bail!("{} is not a directory", args.root.display());
    }

    let summary = run(&args.root, &args.out, &config)
        .with_context(|| format!("failed to index {}", args.root.display()))?;

    println!(
        "Indexed {} documents from {}/{} files into {}",
        summary.documents,
        summary.files_indexed,
        summary.files_scanned,
        args.out.display()
    );
    for (category, count) in &summary.categories {
        println!("  {:<24} {}", category, count);
    }
    if !summary.failures.is_empty() {
        println!("Skipped {} file(s):", summary.failures.len());
        for failure in &summary.failures {
            println!("  {}: {}", failure.file, failure.message);
        }
    }
    if !summary.skipped_entries.is_empty() {
        println!("Skipped {} malformed preset entries", summary.skipped_entries.len());
    }
    if !summary.duplicate_ids.is_empty() {
        println!("Dropped {} preset(s) with duplicate ids:", summary.duplicate_ids.len());
        for dup in &summary.duplicate_ids {
            println!("  {} ({}:{}[{}])", dup.id, dup.file, dup.export, dup.index);
        }
    }

    Ok(())
}
