// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is only one thing this tool does (crawl), so unlike a multi-command
// tool we parse straight into a flat struct without subcommands.
//
// The defaults below are the same ones the crawler has always shipped with:
// depth 1, a 2 second delay, 200 pages max, traffic routed through Tor.
// =============================================================================

use clap::Parser;

pub const DEFAULT_USER_AGENT: &str = "ShadowCrawler/1.0 (+https://example.local)";
pub const DEFAULT_PROXY: &str = "socks5h://127.0.0.1:9050";
pub const DEFAULT_OUTPUT_DIR: &str = "tor_output";

#[derive(Parser, Debug)]
#[command(
    name = "onion-crawl",
    version = "0.1.0",
    about = "A breadth-first web crawler that can route its traffic through Tor",
    long_about = "onion-crawl starts at a URL, follows same-site links breadth-first up to a \
                  depth and page limit, saves every HTML page it finds and writes a CSV log \
                  of everything it did. Works with regular sites and .onion addresses."
)]
pub struct Cli {
    /// Start URL (http(s) or .onion)
    ///
    /// Example: onion-crawl -u http://example.com -d 2
    #[arg(short = 'u', long)]
    pub url: String,

    /// Crawl depth
    ///
    /// Depth 0 = just the start page
    /// Depth 1 = start page + the pages it links to
    /// etc.
    #[arg(short = 'd', long, default_value_t = 1)]
    pub depth: usize,

    /// Delay between requests, in seconds
    #[arg(short = 'p', long, default_value_t = 2.0)]
    pub delay: f64,

    /// Disable Tor (use direct requests)
    #[arg(long)]
    pub no_tor: bool,

    /// Ignore robots.txt
    #[arg(long)]
    pub no_robots: bool,

    /// User-Agent string sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum pages to crawl (blocked and failed pages count too)
    #[arg(long, default_value_t = 200)]
    pub max_pages: usize,

    /// Output directory for saved pages and crawl_log.csv
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: String,

    /// Proxy endpoint used when Tor is enabled
    #[arg(long, default_value = DEFAULT_PROXY)]
    pub proxy: String,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["onion-crawl", "-u", "http://example.com"]);
        assert_eq!(cli.depth, 1);
        assert_eq!(cli.delay, 2.0);
        assert_eq!(cli.max_pages, 200);
        assert_eq!(cli.output, "tor_output");
        assert_eq!(cli.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cli.proxy, DEFAULT_PROXY);
        assert_eq!(cli.timeout, 30);
        assert!(!cli.no_tor);
        assert!(!cli.no_robots);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from([
            "onion-crawl", "-u", "http://xyz.onion", "-d", "3", "-p", "0.5", "-o", "out",
            "--no-tor", "--no-robots",
        ]);
        assert_eq!(cli.url, "http://xyz.onion");
        assert_eq!(cli.depth, 3);
        assert_eq!(cli.delay, 0.5);
        assert_eq!(cli.output, "out");
        assert!(cli.no_tor);
        assert!(cli.no_robots);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["onion-crawl"]).is_err());
    }
}
