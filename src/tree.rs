//! Tree listing model and manifest selection
//!
//! The trees API returns every path in the repository at a given branch with
//! its object kind. Only `blob` entries that are direct children of the
//! configured target folder and carry a `.json` extension are mirrored.

use crate::config::Config;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Object kind of a tree entry
///
/// The live API also returns `commit` for submodule pointers; anything that
/// is not a `blob` or `tree` is captured by [`ObjectKind::Other`] and never
/// selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A file object
    Blob,
    /// A directory object
    Tree,
    /// Any other object kind (e.g. submodule commit)
    #[serde(other)]
    Other,
}

/// One entry from the recursive tree listing
#[derive(Clone, Debug, Deserialize)]
pub struct TreeEntry {
    /// Path of the object relative to the repository root
    pub path: String,

    /// Object kind (`type` in the wire format)
    #[serde(rename = "type")]
    pub kind: ObjectKind,
}

/// Recursive tree listing response
#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    /// All entries in the tree
    pub tree: Vec<TreeEntry>,

    /// Set by the server when the listing was too large to return in full
    #[serde(default)]
    pub truncated: bool,
}

/// A single planned download, derived 1:1 from a qualifying tree entry
///
/// Constructed once, consumed once; not retained after the download attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTask {
    /// Destination path, the remote relative path resolved under the output root
    pub local_path: PathBuf,

    /// Direct-content URL the file is fetched from
    pub remote_url: String,
}

impl TreeEntry {
    /// Whether this entry is a JSON manifest directly inside `folder`
    ///
    /// Direct children only: `data/a.json` qualifies for folder `data`,
    /// `data/sub/b.json` does not.
    pub fn is_manifest_in(&self, folder: &str) -> bool {
        if self.kind != ObjectKind::Blob {
            return false;
        }
        let path = Path::new(&self.path);
        path.extension().is_some_and(|ext| ext == "json")
            && path.parent().is_some_and(|parent| parent == Path::new(folder))
    }
}

/// Build the direct-content URL for a repository path
///
/// Produces `{raw_base}/{owner}/{repo}/{branch}/{path}` exactly.
pub fn raw_content_url(config: &Config, path: &str) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        config.repo.raw_base, config.repo.owner, config.repo.repo, config.repo.branch, path
    )
}

/// Filter a tree listing down to the qualifying manifests and plan their downloads
///
/// Each task's local path preserves the remote relative path under the
/// configured output root.
pub fn plan_downloads(config: &Config, entries: &[TreeEntry]) -> Vec<DownloadTask> {
    entries
        .iter()
        .filter(|entry| entry.is_manifest_in(&config.repo.target_folder))
        .map(|entry| DownloadTask {
            local_path: config.output_root.join(&entry.path),
            remote_url: raw_content_url(config, &entry.path),
        })
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, kind: ObjectKind) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind,
        }
    }

    #[test]
    fn selects_only_direct_json_children() {
        let entries = vec![
            entry("data/a.json", ObjectKind::Blob),
            entry("data/sub/b.json", ObjectKind::Blob),
            entry("data/c.txt", ObjectKind::Blob),
            entry("other/d.json", ObjectKind::Blob),
        ];

        let selected: Vec<&TreeEntry> = entries
            .iter()
            .filter(|e| e.is_manifest_in("data"))
            .collect();

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].path, "data/a.json");
    }

    #[test]
    fn directories_never_qualify() {
        assert!(!entry("data/a.json", ObjectKind::Tree).is_manifest_in("data"));
        assert!(!entry("data/sub.json", ObjectKind::Other).is_manifest_in("data"));
    }

    #[test]
    fn top_level_files_do_not_match_the_target_folder() {
        assert!(!entry("data.json", ObjectKind::Blob).is_manifest_in("data"));
    }

    #[test]
    fn raw_url_matches_pattern_exactly() {
        let config = Config::default();
        assert_eq!(
            raw_content_url(&config, "data/solNodes.json"),
            "https://raw.githubusercontent.com/WFCD/warframe-worldstate-data/master/data/solNodes.json"
        );
    }

    #[test]
    fn planned_tasks_preserve_relative_paths_under_output_root() {
        let config = Config {
            output_root: PathBuf::from("/tmp/mirror"),
            ..Default::default()
        };
        let entries = vec![
            entry("data/a.json", ObjectKind::Blob),
            entry("other/d.json", ObjectKind::Blob),
        ];

        let tasks = plan_downloads(&config, &entries);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].local_path, PathBuf::from("/tmp/mirror/data/a.json"));
        assert_eq!(
            tasks[0].remote_url,
            "https://raw.githubusercontent.com/WFCD/warframe-worldstate-data/master/data/a.json"
        );
    }

    #[test]
    fn unknown_object_kinds_deserialize_as_other() {
        let json = r#"{"path": "vendor/lib", "type": "commit", "sha": "abc"}"#;
        let parsed: TreeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, ObjectKind::Other);
    }

    #[test]
    fn truncated_flag_defaults_to_false() {
        let json = r#"{"tree": [{"path": "data/a.json", "type": "blob"}]}"#;
        let parsed: TreeResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.truncated);
        assert_eq!(parsed.tree.len(), 1);
    }
}
