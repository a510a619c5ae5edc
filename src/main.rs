//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the course-catalog harvester.

use anyhow::Context;
use catalog_harvest::catalog::{current_terms, run_harvest};
use catalog_harvest::client::API_KEY_VAR;
use catalog_harvest::config::load_config;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a course-catalog history harvester
///
/// Sweeps a rate-limited catalog API term by term, then fills in
/// per-section detail records with as few requests as the coverage
/// structure allows, and writes one CSV row per (course, term, section).
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A course-catalog history harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the sweep plan without issuing requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    run_harvest(config).await.context("harvest failed")?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the sweep plan
fn handle_dry_run(config: &catalog_harvest::config::Config) {
    println!("=== Catalog-Harvest Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Requests per minute: {}", config.api.requests_per_minute);
    println!("  Timeout: {}s", config.api.timeout_secs);
    match &config.api.alert_webhook {
        Some(url) => println!("  Alert webhook: {}", url),
        None => println!("  Alert webhook: (log only)"),
    }

    println!("\nSchools ({}):", config.catalog.schools.len());
    for school in &config.catalog.schools {
        println!("  - {}", school);
    }

    let terms = current_terms(&config.catalog);
    println!("\nSweep plan: {} terms from {} on", terms.len(), config.catalog.start_year);
    if let (Some(first), Some(last)) = (terms.first(), terms.last()) {
        println!("  {} .. {}", first, last);
    }
    println!(
        "  {} bulk-listing calls before detail fetching begins",
        terms.len() * config.catalog.schools.len()
    );

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    if std::env::var(API_KEY_VAR).is_ok() {
        println!("\n✓ {} is set", API_KEY_VAR);
    } else {
        println!("\n✗ {} is NOT set; the harvest would abort at startup", API_KEY_VAR);
    }

    println!("✓ Configuration is valid");
}
