//! Synchronization engine
//!
//! Two independent steps run in sequence: the tree listing is fetched and the
//! qualifying manifests downloaded on a bounded worker pool, then the
//! aggregate drop-table file is fetched. Failures in either step are logged
//! and swallowed; one file's failure never affects its siblings.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tree::{TreeEntry, TreeResponse, plan_downloads};

use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Outcome of a full sync pass
///
/// Counts are informational; no failure mode escalates past a log line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of manifests selected from the tree listing
    pub selected: usize,
    /// Number of manifests written to disk
    pub downloaded: usize,
    /// Number of manifests that failed to download
    pub failed: usize,
    /// Whether the drop-table file was written
    pub drops_downloaded: bool,
}

/// Mirrors the worldstate manifest folder and the drop-table file locally
#[derive(Clone)]
pub struct WorldstateSync {
    /// Configuration (wrapped in Arc for sharing across worker tasks)
    config: Arc<Config>,
    /// Shared HTTP client (timeout and User-Agent applied to every request)
    http: reqwest::Client,
}

impl WorldstateSync {
    /// Create a new sync engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .user_agent(config.http.user_agent.clone())
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Access the effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run both sync steps in sequence
    ///
    /// Mirrors the manifest folder, then fetches the drop tables. Neither
    /// step's failure is propagated; the report carries the counts.
    pub async fn run(&self) -> SyncReport {
        let mut report = self.sync_data().await;

        match self.sync_drops().await {
            Ok(()) => {
                report.drops_downloaded = true;
                info!("drops download complete");
            }
            Err(e) => warn!("failed to download drops: {}", e),
        }

        report
    }

    /// Fetch the recursive tree listing of the configured repository
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx response, or a body
    /// that does not parse as a tree listing.
    pub async fn fetch_tree(&self) -> Result<Vec<TreeEntry>> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.config.repo.api_base,
            self.config.repo.owner,
            self.config.repo.repo,
            self.config.repo.branch
        );

        debug!("fetching tree listing from {}", url);
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let listing: TreeResponse = response.json().await?;
        if listing.truncated {
            warn!(
                "tree listing for {}/{} is truncated; some manifests may be missed",
                self.config.repo.owner, self.config.repo.repo
            );
        }

        Ok(listing.tree)
    }

    /// Mirror the qualifying manifest files to the local output root
    ///
    /// A listing failure is logged and treated as zero files found. Planned
    /// downloads run on a worker pool bounded by
    /// `http.max_concurrent_downloads`; every task completes (success or
    /// logged failure) before this method returns.
    pub async fn sync_data(&self) -> SyncReport {
        info!("fetching file list from {}...", self.config.repo.repo);

        let entries = match self.fetch_tree().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to fetch tree: {}", e);
                return SyncReport::default();
            }
        };

        let tasks = plan_downloads(&self.config, &entries);
        info!("found {} JSON files, starting download...", tasks.len());

        let mut report = SyncReport {
            selected: tasks.len(),
            ..Default::default()
        };

        let limit = Arc::new(Semaphore::new(self.config.http.max_concurrent_downloads));
        let mut pool = JoinSet::new();

        for task in tasks {
            let permit = match limit.clone().acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore closed — stop dispatching, drain what was spawned
                Err(_) => break,
            };

            let client = self.http.clone();
            pool.spawn(async move {
                let _permit = permit;
                let outcome = download_to_path(&client, &task.remote_url, &task.local_path).await;
                (task, outcome)
            });
        }

        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok((task, Ok(()))) => {
                    debug!("downloaded {}", task.local_path.display());
                    report.downloaded += 1;
                }
                Ok((task, Err(e))) => {
                    warn!("failed to download {}: {}", task.local_path.display(), e);
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("download worker panicked: {}", e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "data download complete ({} ok, {} failed)",
            report.downloaded, report.failed
        );
        report
    }

    /// Fetch the aggregate drop-table file to `{output_dir}/{output_file}`
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx response, or a
    /// filesystem error while writing the destination.
    pub async fn sync_drops(&self) -> Result<()> {
        let output_path = self
            .config
            .output_root
            .join(&self.config.drops.output_dir)
            .join(&self.config.drops.output_file);

        info!(
            "downloading {} to {}...",
            self.config.drops.url,
            output_path.display()
        );
        download_to_path(&self.http, &self.config.drops.url, &output_path).await
    }
}

/// Fetch one URL and stream the response body to `local_path`
///
/// Parent directories are created as needed; an existing file is overwritten.
async fn download_to_path(client: &reqwest::Client, url: &str, local_path: &Path) -> Result<()> {
    if let Some(parent) = local_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    info!("downloading {}...", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let mut file = tokio::fs::File::create(local_path).await?;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;

    Ok(())
}
