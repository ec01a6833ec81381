//! Per-bug session
//!
//! Holds the directories one bug's import works in. Created from the
//! configuration and passed to every import operation.

use crate::config::AppConfig;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

const IMPORTS_DIR: &str = "imports";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Directories owned by one bug id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugSession {
    bug_id: String,
    download_dir: PathBuf,
    import_dir: PathBuf,
}

impl BugSession {
    /// Creates a session for `bug_id`.
    ///
    /// The id becomes a directory name, so it must be a single non-empty
    /// path component.
    pub fn new(config: &AppConfig, bug_id: &str) -> Result<Self> {
        let bug_id = bug_id.trim();
        if bug_id.is_empty() {
            bail!("Bug id must not be empty");
        }
        if bug_id.contains(['/', '\\', ':']) || bug_id == "." || bug_id == ".." {
            bail!("Bug id '{}' is not a valid directory name", bug_id);
        }

        Ok(Self {
            bug_id: bug_id.to_string(),
            download_dir: config.download_root.join(bug_id),
            import_dir: config.cache_root.join(IMPORTS_DIR).join(bug_id),
        })
    }

    pub fn bug_id(&self) -> &str {
        &self.bug_id
    }

    /// `<download_root>/<bug_id>`
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// `<cache_root>/imports/<bug_id>`
    pub fn import_dir(&self) -> &Path {
        &self.import_dir
    }

    /// Creates the download directory if needed
    pub fn ensure_download_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.download_dir).with_context(|| {
            format!(
                "Failed to create download directory {}",
                self.download_dir.display()
            )
        })?;
        Ok(&self.download_dir)
    }

    /// Creates a fresh `<import dir>/<YYYYMMDD_HHMMSS>` directory.
    ///
    /// A second import within the same second gets a `_2`, `_3`, ... suffix.
    pub fn create_extract_dir(&self, now: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.import_dir).with_context(|| {
            format!(
                "Failed to create import directory {}",
                self.import_dir.display()
            )
        })?;

        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        let mut dir = self.import_dir.join(&stamp);
        let mut n = 2;
        while dir.exists() {
            dir = self.import_dir.join(format!("{}_{}", stamp, n));
            n += 1;
        }

        fs::create_dir(&dir)
            .with_context(|| format!("Failed to create extract directory {}", dir.display()))?;
        Ok(dir)
    }
}
