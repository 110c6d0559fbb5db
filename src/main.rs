//! rust-gopher-crawler - Main entry point
//!
//! Crawls one gopher server, saves every listing it visits, downloads the
//! unique text and binary items, and prints a summary.

use anyhow::{Context, Result};
use rust_gopher_crawler::{CliArgs, Config, CrawlReport, Crawler, DownloadManager};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Initialize logging
    init_logging(&args);
    info!("rust-gopher-crawler starting");
    debug!("CLI arguments: {:?}", args);

    // Create and validate configuration
    let config = Config::from_args(&args).context("Failed to resolve target")?;
    config.validate().context("Invalid configuration")?;

    display_config(&config);

    // Crawl the origin server
    let mut crawler = Crawler::new(config.host.clone(), config.port, config.captures_dir.clone());
    let items = crawler
        .crawl()
        .await
        .with_context(|| format!("Crawl of {} failed", config.origin_addr()))?;

    let Some(mut items) = items else {
        println!("The root listing of {} yielded no items.", config.origin_addr());
        return Ok(());
    };

    // Download every unique text and binary item
    let downloader = DownloadManager::new(config.output_dir.clone());
    let totals = downloader
        .download_all(&mut items)
        .await
        .context("Download failed")?;
    info!(
        "Downloaded {} files, {} bytes",
        totals.files, totals.bytes
    );

    // Report, with sizes realized by the download pass
    let report = CrawlReport::from_items(&items, &config.host);
    report.print();

    if config.summary {
        let path = config.output_dir.join("summary.json");
        report
            .write_json(&path)
            .await
            .context("Failed to write crawl summary")?;
        println!("Summary written to {}", path.display());
    }

    info!("rust-gopher-crawler finished");
    Ok(())
}

/// Initialize logging based on verbosity settings
fn init_logging(args: &CliArgs) {
    let level = args.log_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if args.is_verbose() {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

/// Display crawl configuration
fn display_config(config: &Config) {
    println!("Crawl configuration:");
    println!("  Origin: {}", config.origin_addr());
    println!("  Output directory: {}", config.output_dir.display());
    println!("  Captures directory: {}", config.captures_dir.display());
    println!("  Summary: {}", if config.summary { "enabled" } else { "disabled" });
    println!();
}
