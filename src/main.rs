//! shelfindex - Builds a JSON catalog of the e-books in a repository checkout.
//!
//! Usage:
//!   shelfindex               Scan the configured directories and write the manifest
//!   shelfindex -v            Same, with progress logging
//!   shelfindex --help        Show help

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use shelfindex_scan::{CatalogConfig, CatalogScanner, write_manifest};

#[derive(Parser)]
#[command(
    name = "shelfindex",
    version,
    about = "Builds a JSON catalog of the e-books in a repository checkout",
    long_about = "shelfindex walks the configured book directories under the current \
                  directory and writes docs/data/books.json, one entry per book with \
                  its category and download URL."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(&CatalogConfig::default())
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Scan, report, and write the manifest.
fn run(config: &CatalogConfig) -> Result<()> {
    let kind = config.extension.trim_start_matches('.').to_uppercase();
    eprintln!("Starting scan for {kind} files...");

    let scan = CatalogScanner::new(config.clone())
        .scan()
        .context("Scan failed")?;

    for warning in &scan.warnings {
        eprintln!("Warning: {}", warning.message);
    }
    eprintln!("Found {} books.", scan.manifest.len());

    for (category, count) in &scan.stats.per_category {
        tracing::info!(category = %category, books = count, "Category summary");
    }
    tracing::debug!(elapsed = ?scan.duration, "Scan finished");

    write_manifest(config, &scan.manifest).with_context(|| {
        format!("Failed to write {}", config.output_path.display())
    })?;

    eprintln!("Successfully created '{}'!", config.output_path.display());
    Ok(())
}
