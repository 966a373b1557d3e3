// src/telemetry.rs
// =============================================================================
// Logging setup.
//
// The tracing subscriber is process-wide state, so it lives here and is set
// up exactly once from main.rs. Nothing in crawl/ knows how logs are printed;
// it just calls tracing::info!/warn! and friends.
//
// Control verbosity with RUST_LOG, e.g. RUST_LOG=onion_crawl=debug
// =============================================================================

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

// Installs the global subscriber. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

        // try_init so a subscriber installed by someone else (tests) is not fatal
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
