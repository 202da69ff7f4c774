//! Pine-Ref-Harvest main entry point
//!
//! This is the command-line interface for the reference harvester.

use anyhow::Context;
use clap::Parser;
use pine_ref_harvest::config::{load_config_with_hash, validate, Config};
use pine_ref_harvest::crawler::run_harvest;
use pine_ref_harvest::model::Category;
use pine_ref_harvest::output::{print_report, write_report};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Pine-Ref-Harvest: a versioned Pine Script reference harvester
///
/// Crawls the reference index of every configured language version and
/// writes one JSON artifact per version and category.
#[derive(Parser, Debug)]
#[command(name = "pine-ref-harvest")]
#[command(version)]
#[command(about = "Harvest the Pine Script language reference", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(dir) = cli.output {
        config.output.set_directory(dir.display().to_string());
        validate(&config).context("invalid output override")?;
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_harvest(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pine_ref_harvest=info,warn"),
            1 => EnvFilter::new("pine_ref_harvest=debug,info"),
            2 => EnvFilter::new("pine_ref_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved configuration and index URLs
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Pine-Ref-Harvest Dry Run ===\n");

    let scraper = &config.scraper;
    println!("Scraper Configuration:");
    println!("  Base URL: {}", scraper.base_url);
    println!("  Concurrency limit: {}", scraper.concurrency_limit);
    match scraper.item_cap() {
        Some(cap) => println!("  Per-item cap: {} per category", cap),
        None => println!("  Per-item cap: unbounded"),
    }
    println!("  Detail mode: {:?}", scraper.detail_mode);
    println!("  Wait timeout: {}ms", scraper.wait_timeout_ms);
    println!("  Poll interval: {}ms", scraper.poll_interval_ms);
    println!("  Respect robots.txt: {}", scraper.respect_robots);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Summary: {}", config.output.summary_path);

    let base = Url::parse(&scraper.base_url).context("invalid base URL")?;
    println!("\nVersions ({}):", scraper.versions.len());
    for version in &scraper.versions {
        println!("  - {} -> {}", version, version.index_url(&base)?);
    }

    let categories: Vec<_> = Category::ALL.iter().map(|c| c.title()).collect();
    println!("\nCategories: {}", categories.join(", "));

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would write up to {} artifacts",
        scraper.versions.len() * Category::ALL.len()
    );

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting {} versions into {}",
        config.scraper.versions.len(),
        config.output.directory
    );

    let report = run_harvest(config).await.context("harvest failed to start")?;

    print_report(&report);

    let summary_path = Path::new(&config.output.summary_path);
    match write_report(&report, summary_path) {
        Ok(()) => tracing::info!("Run report written to {}", summary_path.display()),
        Err(e) => tracing::error!("Failed to write run report: {}", e),
    }

    Ok(())
}
