// src/tor.rs
// =============================================================================
// Tor daemon checks.
//
// When the crawl goes through Tor we need the local Tor service to be up,
// otherwise every single request fails with a proxy error. Before crawling:
// 1. Check the `tor` binary is installed
// 2. Check the systemd service is active
// 3. If not, try to start it and check again
//
// The crawl engine never calls into this module. It only gets an HTTP client
// that happens to be pointed at the proxy.
// =============================================================================

use crate::error::ProxyError;
use std::time::Duration;
use tokio::process::Command;
use tracing::{error, info, warn};

// How long we give the service to come up after `systemctl start`
const START_GRACE: Duration = Duration::from_secs(3);

pub async fn check_installed() -> Result<bool, ProxyError> {
    let status = Command::new("which")
        .arg("tor")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|source| ProxyError::Command {
            command: "which tor".to_string(),
            source,
        })?;

    if status.success() {
        info!("Tor is installed");
    } else {
        error!("Tor is not installed. Please install it: sudo apt install tor");
    }
    Ok(status.success())
}

pub async fn check_service() -> bool {
    // `systemctl is-active` exits non-zero for inactive units but still
    // prints the state, so only stdout matters
    let output = match Command::new("systemctl").args(["is-active", "tor"]).output().await {
        Ok(output) => output,
        Err(e) => {
            error!("Tor service not found or inactive: {}", e);
            return false;
        }
    };

    let state = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if is_active_state(&state) {
        info!("Tor service is running");
        true
    } else {
        warn!("Tor service status: {}", if state.is_empty() { "unknown" } else { state.as_str() });
        false
    }
}

pub async fn start_service() -> Result<(), ProxyError> {
    info!("Attempting to start Tor service...");

    let status = Command::new("sudo")
        .args(["systemctl", "start", "tor"])
        .status()
        .await
        .map_err(|source| ProxyError::Command {
            command: "sudo systemctl start tor".to_string(),
            source,
        })?;

    if !status.success() {
        warn!("systemctl start tor exited with {}", status);
    }

    tokio::time::sleep(START_GRACE).await;

    if check_service().await {
        Ok(())
    } else {
        Err(ProxyError::StartFailed)
    }
}

// Runs all three steps in order. Called by main.rs when Tor is enabled.
pub async fn ensure_running() -> Result<(), ProxyError> {
    if !check_installed().await? {
        return Err(ProxyError::NotInstalled);
    }

    if !check_service().await {
        start_service().await?;
    }

    Ok(())
}

fn is_active_state(state: &str) -> bool {
    state == "active"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_counts() {
        assert!(is_active_state("active"));
        assert!(!is_active_state("inactive"));
        assert!(!is_active_state("activating"));
        assert!(!is_active_state(""));
    }
}
