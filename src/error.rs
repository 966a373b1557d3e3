// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Only a few things are allowed to stop a crawl:
// - bad configuration (caught before any request is made)
// - the Tor daemon being missing or refusing to start
// - failing to write a page or an audit record to disk
//
// Network failures on a single page are NOT errors here. They are recorded
// in the audit log as `error:<Kind>` and the crawl moves on (see crawl/fetch.rs).
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("start URL must not be empty")]
    EmptyUrl,

    #[error("delay must be a finite number of seconds >= 0, got {0}")]
    InvalidDelay(f64),

    #[error("max pages must be at least 1")]
    ZeroPageBudget,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Failure to persist a fetched page body.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write page to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Failure to open or append to the CSV audit log.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to open audit log {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to write audit record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush audit log: {0}")]
    Flush(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("tor is not installed; install it with: sudo apt install tor")]
    NotInstalled,

    #[error("tor service failed to start; start it manually")]
    StartFailed,

    #[error("failed to run {command}: {source}")]
    Command { command: String, source: io::Error },
}

// Anything that ends a crawl run early
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}
