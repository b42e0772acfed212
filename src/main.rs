//! worldstate-sync binary entry point
//!
//! No flags or arguments. Reads `worldstate-sync.json` from the working
//! directory when present, otherwise runs with the built-in defaults.
//! Partial download failures are logged and never change the exit status.

use std::path::Path;
use tracing::{info, warn};
use worldstate_sync::{Config, WorldstateSync};

/// Optional configuration override file, read from the working directory
const CONFIG_FILE: &str = "worldstate-sync.json";

fn load_config() -> Config {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }

    match Config::from_json_file(path) {
        Ok(config) => {
            info!("loaded configuration from {}", CONFIG_FILE);
            config
        }
        Err(e) => {
            warn!("ignoring malformed {}: {}", CONFIG_FILE, e);
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = load_config();

    let sync = match WorldstateSync::new(config) {
        Ok(sync) => sync,
        Err(e) => {
            warn!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("running data sync...");
    let report = sync.run().await;
    info!(
        "sync finished: {} selected, {} downloaded, {} failed, drops {}",
        report.selected,
        report.downloaded,
        report.failed,
        if report.drops_downloaded { "ok" } else { "failed" }
    );
}
