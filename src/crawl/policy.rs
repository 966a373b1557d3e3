// src/crawl/policy.rs
// =============================================================================
// Which links get crawled.
//
// Two separate gates:
//
// 1. LinkPolicy decides which discovered links go into the frontier:
//    - http/https only
//    - same site as the start URL, or a subdomain of it
//    - not already visited
//
// 2. A PermissionOracle is asked about each URL as it comes off the
//    frontier. With robots.txt respected that's RobotsTxt; otherwise
//    AllowAll. A URL the oracle refuses is logged as robots_blocked and
//    never requested.
//
// robots.txt is fetched once, from the start URL's origin, and applies to
// the whole crawl. If it can't be fetched, everything is allowed.
// =============================================================================

use super::frontier::Frontier;
use super::normalize::{in_scope, is_web_scheme, normalize, site_of};
use reqwest::Client;
use robotstxt::DefaultMatcher;
use tracing::{debug, info, warn};
use url::Url;

pub trait PermissionOracle: Send + Sync {
    fn is_allowed(&self, user_agent: &str, url: &str) -> bool;
}

pub struct AllowAll;

impl PermissionOracle for AllowAll {
    fn is_allowed(&self, _user_agent: &str, _url: &str) -> bool {
        true
    }
}

// A parsed robots.txt, matched with Google's rules via the robotstxt crate
pub struct RobotsTxt {
    body: String,
}

impl RobotsTxt {
    pub fn from_body(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    // Fetches <scheme>://<host>/robots.txt for the given page.
    // Returns None when there's no usable robots.txt.
    pub async fn fetch(client: &Client, page_url: &str) -> Option<Self> {
        let robots_url = robots_url_for(page_url)?;

        let response = match client.get(&robots_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Could not fetch {}: {}", robots_url, e);
                return None;
            }
        };

        // 401/403 included: an unreadable robots.txt restricts nothing
        if !response.status().is_success() {
            debug!("{} returned {}, allowing everything", robots_url, response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(Self::from_body(body)),
            Err(e) => {
                warn!("Could not read {}: {}", robots_url, e);
                None
            }
        }
    }
}

impl PermissionOracle for RobotsTxt {
    fn is_allowed(&self, user_agent: &str, url: &str) -> bool {
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.body, product_token(user_agent), url)
    }
}

// Builds the oracle for a crawl starting at `start_url`
pub async fn load_oracle(
    client: &Client,
    start_url: &str,
    respect_robots: bool,
) -> Box<dyn PermissionOracle> {
    if !respect_robots {
        info!("Ignoring robots.txt");
        return Box::new(AllowAll);
    }

    let start_url = normalize(start_url);
    match RobotsTxt::fetch(client, &start_url).await {
        Some(robots) => {
            info!("Loaded robots.txt for {}", site_of(&start_url));
            Box::new(robots)
        }
        None => Box::new(AllowAll),
    }
}

pub fn robots_url_for(page_url: &str) -> Option<String> {
    let mut url = Url::parse(page_url).ok()?;
    url.set_path("/robots.txt");
    url.set_query(None);
    url.set_fragment(None);
    Some(url.into())
}

// robots.txt groups name products ("ShadowCrawler"), not full User-Agent
// headers ("ShadowCrawler/1.0 (+https://...)")
fn product_token(user_agent: &str) -> &str {
    let end = user_agent
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(user_agent.len());
    &user_agent[..end]
}

// Decides which discovered links enter the frontier
pub struct LinkPolicy {
    seed_site: String,
}

impl LinkPolicy {
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_site: site_of(&normalize(seed_url)),
        }
    }

    // Queues `candidate` one level below the page it was found on, if it
    // passes every rule. Returns whether it was queued.
    pub fn admit(&self, candidate: &str, source_depth: usize, frontier: &mut Frontier) -> bool {
        let url = normalize(candidate);

        if !is_web_scheme(&url) {
            return false;
        }

        if !in_scope(&site_of(&url), &self.seed_site) {
            debug!("Out of scope: {}", url);
            return false;
        }

        if frontier.is_visited(&url) {
            return false;
        }

        frontier.push(url, source_depth + 1);
        true
    }
}
