// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and validate them
// 2. Set up logging
// 3. If Tor is enabled, make sure the Tor service is running
// 4. Build the HTTP client, robots.txt oracle, page store and crawl log
// 5. Run the crawl
// 6. Exit with proper code (0 = crawl finished, 1 = crawl could not run)
// =============================================================================

mod audit;     // src/audit.rs - CSV crawl log
mod cli;       // src/cli.rs - command-line parsing
mod client;    // src/client.rs - HTTP client (direct or through Tor)
mod config;    // src/config.rs - validated crawl settings
mod crawl;     // src/crawl/ - the crawl engine
mod error;     // src/error.rs - error types
mod storage;   // src/storage.rs - saving pages to disk
mod telemetry; // src/telemetry.rs - logging setup
mod tor;       // src/tor.rs - Tor service checks

use anyhow::{Context, Result};
use audit::AuditLog;
use clap::Parser;
use cli::Cli;
use config::CrawlConfig;
use crawl::{CrawlSummary, Crawler};
use storage::FsPageStore;

#[tokio::main]
async fn main() {
    telemetry::init();

    let exit_code = match run().await {
        Ok(_) => 0,
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<CrawlSummary> {
    let cli = Cli::parse();
    let config = CrawlConfig::from_cli(&cli).context("Invalid arguments")?;

    if config.uses_proxy() {
        tor::ensure_running().await.context("Tor is required unless --no-tor is given")?;
    }

    let store = FsPageStore::create(&config.output_dir)?;
    let audit = AuditLog::open(config.log_path())?;
    tracing::info!("Writing crawl log to {}", audit.path().display());

    let client = client::build_client(&config).context("Failed to build HTTP client")?;
    let oracle = crawl::load_oracle(&client, &config.start_url, config.respect_robots).await;

    let mut crawler = Crawler::new(config, client, oracle, Box::new(store), Box::new(audit));
    let summary = crawler.run().await?;
    Ok(summary)
}
