//! Adsift main entry point
//!
//! Command-line interface for the adsift classified-listing harvester.

use adsift::config::load_config_with_hash;
use adsift::extract::store_key;
use adsift::progress::TracingObserver;
use adsift::Pipeline;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Adsift: a classified-listing harvester
///
/// Adsift scans a classified-ad index, follows each listing to its detail
/// page, extracts structured fields, geocodes the advertised city, and
/// appends unique listings to a dated spreadsheet, rotating its VPN egress
/// IP when the source starts refusing requests.
#[derive(Parser, Debug)]
#[command(name = "adsift")]
#[command(version)]
#[command(about = "A classified-listing harvester", long_about = None)]
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

    /// Validate config and show what would be harvested without fetching
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
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("adsift=info,warn"),
            1 => EnvFilter::new("adsift=debug,info"),
            2 => EnvFilter::new("adsift=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &adsift::Config) {
    println!("=== Adsift Dry Run ===\n");

    println!("Search:");
    println!("  Index URL: {}", config.search.index_url);
    println!("  Listing selector: {}", config.search.listing_selector);
    println!(
        "  Target: {}, {} ({} miles)",
        config.search.city, config.search.state, config.search.distance
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Fetch timeout: {}s", config.http.fetch_timeout_secs);

    println!("\nVPN:");
    println!("  Install dir: {}", config.vpn.install_dir);
    println!("  Region: {}", config.vpn.region);
    println!("  Process name: {}", config.vpn.process_name);

    let key = store_key(
        &config.search.city,
        &config.search.state,
        config.search.distance,
    );
    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Today's destination: {}", key);

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(config: adsift::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting listings for {}, {} within {} miles",
        config.search.city,
        config.search.state,
        config.search.distance
    );

    let observer = Arc::new(TracingObserver);
    let mut pipeline =
        Pipeline::new(config, observer).context("failed to initialize pipeline")?;

    let candidates = pipeline
        .collect_candidates()
        .await
        .context("failed to scan the listing index")?;
    tracing::info!("Processing {} candidates", candidates.len());

    let saved = pipeline.run(candidates).await;

    tracing::info!(
        "Harvest complete: {} new listings written to {}",
        saved.len(),
        pipeline.store_path().display()
    );

    Ok(())
}
