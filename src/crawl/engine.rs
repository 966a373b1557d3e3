// src/crawl/engine.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Normalize the start URL and queue it at depth 0
// 2. Take the next target off the frontier (already-visited or too-deep
//    targets are skipped without a trace)
// 3. Ask the permission oracle; refused targets are logged robots_blocked
// 4. Otherwise fetch it:
//    - 200 + text/html: save the body, and if we're above max depth, queue
//      its same-site links one level deeper
//    - anything else: just record status and content type
//    - network failure: record error:<Kind> and carry on
// 5. Sleep for the politeness delay, then repeat until the frontier is empty
//    or the page budget is used up
//
// Everything runs one page at a time. The only waits are the request itself
// and the delay after each page.
//
// A page that can't be written to disk (or a log row that can't be written)
// stops the crawl: there's no sensible way to continue without a record of
// what was done.
// =============================================================================

use super::extract::extract_links;
use super::fetch::{fetch_page, FetchOutcome};
use super::frontier::{CrawlTarget, Frontier};
use super::normalize::normalize;
use super::policy::{LinkPolicy, PermissionOracle};
use crate::audit::{AuditRecord, AuditSink};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::storage::PageStore;
use reqwest::Client;
use tracing::{debug, info, warn};

// Counts reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Targets that got an audit row (counts against the page budget)
    pub processed: usize,
    /// Pages saved to disk
    pub saved: usize,
    pub blocked: usize,
    pub errors: usize,
    /// Queue entries dropped as duplicates or beyond max depth
    pub skipped: usize,
}

pub struct Crawler {
    config: CrawlConfig,
    client: Client,
    oracle: Box<dyn PermissionOracle>,
    store: Box<dyn PageStore>,
    audit: Box<dyn AuditSink>,
    frontier: Frontier,
    policy: LinkPolicy,
}

impl Crawler {
    pub fn new(
        config: CrawlConfig,
        client: Client,
        oracle: Box<dyn PermissionOracle>,
        store: Box<dyn PageStore>,
        audit: Box<dyn AuditSink>,
    ) -> Self {
        let policy = LinkPolicy::new(&config.start_url);
        Self {
            config,
            client,
            oracle,
            store,
            audit,
            frontier: Frontier::new(),
            policy,
        }
    }

    pub async fn run(&mut self) -> Result<CrawlSummary, CrawlError> {
        let start = normalize(&self.config.start_url);
        self.frontier.push(start.clone(), 0);

        info!(
            "Starting crawl: {} | Depth={} | TOR={}",
            start,
            self.config.max_depth,
            if self.config.uses_proxy() { "ON" } else { "OFF" }
        );

        let mut summary = CrawlSummary::default();

        while summary.processed < self.config.max_pages {
            let (target, skipped) = self.frontier.next_target(self.config.max_depth);
            summary.skipped += skipped;

            let Some(target) = target else {
                break;
            };

            let outcome = self.process(&target).await?;
            match &outcome {
                FetchOutcome::Fetched { stored_path, .. } if !stored_path.is_empty() => {
                    summary.saved += 1
                }
                FetchOutcome::Fetched { .. } => {}
                FetchOutcome::Blocked => summary.blocked += 1,
                FetchOutcome::Error { .. } => summary.errors += 1,
            }

            self.audit.append(&AuditRecord::new(target.url.as_str(), outcome))?;
            summary.processed += 1;

            info!(
                "[{}/{}] depth {} {} ({} queued)",
                summary.processed,
                self.config.max_pages,
                target.depth,
                target.url,
                self.frontier.len()
            );

            tokio::time::sleep(self.config.delay).await;
        }

        if !self.frontier.is_empty() {
            info!(
                "Page budget of {} reached, {} URL(s) left in the queue",
                self.config.max_pages,
                self.frontier.len()
            );
        }

        info!(
            "Crawl complete: {} processed, {} saved, {} blocked, {} errors, {} unique URLs visited",
            summary.processed,
            summary.saved,
            summary.blocked,
            summary.errors,
            self.frontier.visited_count()
        );
        Ok(summary)
    }

    // Works out the outcome for one target, saving the page and queueing its
    // links along the way
    async fn process(&mut self, target: &CrawlTarget) -> Result<FetchOutcome, CrawlError> {
        if !self.oracle.is_allowed(&self.config.user_agent, &target.url) {
            info!("Blocked by robots.txt: {}", target.url);
            return Ok(FetchOutcome::Blocked);
        }

        let page = match fetch_page(&self.client, &target.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Error fetching {}: {}", target.url, e);
                return Ok(FetchOutcome::Error { kind: e.kind });
            }
        };

        let mut stored_path = String::new();
        if let Some(body) = &page.body {
            stored_path = self.store.persist(&target.url, body).await?;

            // Depth bounds which links we follow, not which pages we fetch
            if target.depth < self.config.max_depth {
                self.queue_links(target, &page.text());
            }
        }

        Ok(FetchOutcome::Fetched {
            status: page.status.as_u16(),
            content_type: page.content_type,
            stored_path,
        })
    }

    fn queue_links(&mut self, source: &CrawlTarget, html: &str) {
        let mut admitted = 0;
        for link in extract_links(&source.url, html) {
            if self.policy.admit(&link, source.depth, &mut self.frontier) {
                admitted += 1;
            }
        }
        debug!("Queued {} link(s) from {}", admitted, source.url);
    }
}
