// src/client.rs
// =============================================================================
// Builds the one HTTP client used for the whole crawl.
//
// The same client fetches robots.txt and every page, so Tor routing, the
// User-Agent and the timeout apply to all of them.
//
// socks5h:// (the default proxy) means DNS is resolved by the proxy too,
// which is what makes .onion hostnames work.
// =============================================================================

use crate::config::CrawlConfig;
use reqwest::{Client, Proxy};

pub fn build_client(config: &CrawlConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout);

    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(Proxy::all(proxy.as_str())?);
    }

    builder.build()
}
