//! Configuration types for worldstate-sync

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source repository configuration (owner, name, branch, target folder)
///
/// Groups settings describing which repository tree is listed and which of
/// its files are mirrored. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Repository owner (default: "WFCD")
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name (default: "warframe-worldstate-data")
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Branch whose tree is listed (default: "master")
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Directory whose direct-child JSON files are mirrored (default: "data")
    #[serde(default = "default_target_folder")]
    pub target_folder: String,

    /// Base URL of the tree-listing API (default: "https://api.github.com")
    ///
    /// Overridable so tests can point the engine at a mock server; the
    /// default reproduces the fixed production endpoint.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL of the raw-content host (default: "https://raw.githubusercontent.com")
    #[serde(default = "default_raw_base")]
    pub raw_base: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            branch: default_branch(),
            target_folder: default_target_folder(),
            api_base: default_api_base(),
            raw_base: default_raw_base(),
        }
    }
}

/// Drop-table download configuration
///
/// The drops step fetches one aggregate file from a fixed URL and writes it
/// to `{output_dir}/{output_file}` under the output root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DropsConfig {
    /// URL of the aggregate drop-table file
    #[serde(default = "default_drops_url")]
    pub url: String,

    /// Local directory the file is written into (default: "drops")
    #[serde(default = "default_drops_dir")]
    pub output_dir: PathBuf,

    /// Local filename (default: "data.json")
    #[serde(default = "default_drops_file")]
    pub output_file: String,
}

impl Default for DropsConfig {
    fn default() -> Self {
        Self {
            url: default_drops_url(),
            output_dir: default_drops_dir(),
            output_file: default_drops_file(),
        }
    }
}

/// HTTP client behavior (user agent, timeout, concurrency)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent on every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum concurrent file downloads (default: 10)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_downloads: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_concurrent_downloads: default_max_concurrent(),
        }
    }
}

/// Main configuration for [`WorldstateSync`](crate::WorldstateSync)
///
/// All fields default to the reference behavior: listing the
/// `WFCD/warframe-worldstate-data` tree at `master`, mirroring the JSON files
/// directly under `data/`, and fetching the warframestat.us drop tables.
/// `Config::default()` works with zero configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source repository settings
    #[serde(default)]
    pub repo: RepoConfig,

    /// Drop-table download settings
    #[serde(default)]
    pub drops: DropsConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Root directory the mirrored tree and drops are written under (default: ".")
    ///
    /// Mirrored files keep their remote relative paths, so the default
    /// produces `data/*.json` and `drops/data.json` in the working directory.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults, so a partial override
    /// file is valid.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a repository coordinate is empty, an
    /// endpoint base is not a valid URL, or the worker count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.repo.owner.is_empty() {
            return Err(Error::config("repository owner must not be empty", "repo.owner"));
        }
        if self.repo.repo.is_empty() {
            return Err(Error::config("repository name must not be empty", "repo.repo"));
        }
        if self.repo.branch.is_empty() {
            return Err(Error::config("branch must not be empty", "repo.branch"));
        }
        if self.http.max_concurrent_downloads == 0 {
            return Err(Error::config(
                "worker count must be at least 1",
                "http.max_concurrent_downloads",
            ));
        }
        for (value, key) in [
            (&self.repo.api_base, "repo.api_base"),
            (&self.repo.raw_base, "repo.raw_base"),
            (&self.drops.url, "drops.url"),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(Error::config(format!("invalid URL '{}'", value), key));
            }
        }
        Ok(())
    }
}

fn default_owner() -> String {
    "WFCD".to_string()
}

fn default_repo() -> String {
    "warframe-worldstate-data".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_target_folder() -> String {
    "data".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_base() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_drops_url() -> String {
    "https://drops.warframestat.us/data/all.json".to_string()
}

fn default_drops_dir() -> PathBuf {
    PathBuf::from("drops")
}

fn default_drops_file() -> String {
    "data.json".to_string()
}

fn default_user_agent() -> String {
    "Rust-Worldstate-Parser".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent() -> usize {
    10
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}
