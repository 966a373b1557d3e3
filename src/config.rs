// src/config.rs
// =============================================================================
// The validated settings for one crawl run.
//
// cli.rs gives us raw values straight from the command line. Here we check
// them once, up front, so the crawl engine can trust every field.
// =============================================================================

use crate::cli::Cli;
use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: String,
    /// Deepest level whose pages are fetched. Links are only followed from
    /// pages strictly above this level.
    pub max_depth: usize,
    /// Politeness delay applied after every processed page
    pub delay: Duration,
    /// Proxy endpoint, or None for direct requests
    pub proxy: Option<String>,
    pub respect_robots: bool,
    pub user_agent: String,
    /// Page budget: blocked and failed pages count against it
    pub max_pages: usize,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
}

impl CrawlConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let start_url = cli.url.trim();
        if start_url.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }

        if !cli.delay.is_finite() || cli.delay < 0.0 {
            return Err(ConfigError::InvalidDelay(cli.delay));
        }

        if cli.max_pages == 0 {
            return Err(ConfigError::ZeroPageBudget);
        }

        if cli.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            start_url: start_url.to_string(),
            max_depth: cli.depth,
            delay: Duration::from_secs_f64(cli.delay),
            proxy: (!cli.no_tor).then(|| cli.proxy.clone()),
            respect_robots: !cli.no_robots,
            user_agent: cli.user_agent.clone(),
            max_pages: cli.max_pages,
            output_dir: PathBuf::from(&cli.output),
            request_timeout: Duration::from_secs(cli.timeout),
        })
    }

    pub fn uses_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join("crawl_log.csv")
    }
}
