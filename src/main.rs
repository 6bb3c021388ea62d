//! ycrawler main entry point
//!
//! This is the command-line interface for the ycrawler front-page crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ycrawler::config::{load_config_with_hash, Config};
use ycrawler::crawler::{build_scheduler, run_once};
use ycrawler::output::print_statistics;

/// ycrawler: incremental news front-page crawler
///
/// Periodically fetches the front page, downloads every story not seen
/// before together with its discussion thread, and stores the pages linked
/// from top-level comments.
#[derive(Parser, Debug)]
#[command(name = "ycrawler")]
#[command(version)]
#[command(about = "Incremental news front-page crawler", long_about = None)]
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

    /// Run a single pass and exit
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Validate config and show the effective settings without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.once {
        handle_once(config).await?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("ycrawler=info,warn"),
                1 => EnvFilter::new("ycrawler=debug,info"),
                2 => EnvFilter::new("ycrawler=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config) {
    println!("=== ycrawler Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.trimmed_base_url());
    println!("  Front page: {}/", config.site.trimmed_base_url());

    println!("\nStorage:");
    println!("  Root: {}", config.storage.root.display());

    println!("\nSchedule:");
    println!("  Pause between passes: {}s", config.schedule.pause_secs);

    println!("\nFetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent);
    println!(
        "  TLS certificate validation: {}",
        if config.fetch.accept_invalid_certs {
            "disabled"
        } else {
            "enabled"
        }
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the --once mode: one pass, statistics printed to stdout
async fn handle_once(config: Config) -> anyhow::Result<()> {
    let stats = run_once(config).await.context("crawl pass aborted")?;
    stats.log_summary();
    print_statistics(&stats);
    Ok(())
}

/// Handles the main crawl loop; Ctrl-C stops it between passes
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let mut scheduler = build_scheduler(config)?;
    let stop = scheduler.stop_handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current pass");
            stop.stop();
        }
    });

    let summary = scheduler.run(None).await;
    tracing::info!(
        "Crawler stopped after {} passes ({} aborted), {} stories seen",
        summary.total(),
        summary.aborted,
        scheduler.coordinator().seen_count()
    );

    Ok(())
}
