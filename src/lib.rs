//! # worldstate-sync
//!
//! Keeps a local mirror of two Warframe data sources current:
//!
//! - the JSON manifest files directly under `data/` in the
//!   `WFCD/warframe-worldstate-data` repository, enumerated via the GitHub
//!   trees API and fetched from the raw-content host with a bounded worker
//!   pool;
//! - the aggregate drop-table file from warframestat.us, written to
//!   `drops/data.json`.
//!
//! Failures are best-effort: a failed listing means zero files, a failed
//! file is logged and skipped, and the drops step runs regardless of how the
//! mirror step went.
//!
//! ## Quick Start
//!
//! ```no_run
//! use worldstate_sync::{Config, WorldstateSync};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sync = WorldstateSync::new(Config::default())?;
//!     let report = sync.run().await;
//!     println!("{} of {} manifests downloaded", report.downloaded, report.selected);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Synchronization engine
pub mod sync;
/// Tree listing model and manifest selection
pub mod tree;

// Re-export commonly used types
pub use config::{Config, DropsConfig, HttpConfig, RepoConfig};
pub use error::{Error, Result};
pub use sync::{SyncReport, WorldstateSync};
pub use tree::{DownloadTask, ObjectKind, TreeEntry};
