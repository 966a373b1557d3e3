// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Submodules:
// - normalize: canonical URL form, used for every dedup/scope comparison
// - frontier: FIFO queue of pages to visit + visited set
// - extract: finds links in an HTML page
// - fetch: one GET request and how its result is classified
// - policy: which links enter the frontier, and what robots.txt allows
// - engine: the breadth-first loop that ties it all together
//
// Features:
// - Breadth-first crawling starting from a URL
// - Same-site restriction (subdomains of the start host are in scope)
// - Configurable depth limit and page budget
// - Polite crawling with a fixed delay after every page
// =============================================================================

mod engine;
mod extract;
mod fetch;
mod frontier;
mod normalize;
mod policy;

pub use engine::{CrawlSummary, Crawler};
pub use fetch::FetchOutcome;
#[cfg(test)]
pub(crate) use fetch::ErrorKind;
pub use normalize::site_of;
pub use policy::load_oracle;
