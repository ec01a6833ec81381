//! Application configuration
//!
//! Directory roots are injected explicitly: from a JSON file given on the
//! command line, then per-flag overrides, else defaults derived from the
//! user's home and cache environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "sflens";
const DOWNLOAD_DIR: &str = "SfLensLogs";

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-bug folders where bundles are downloaded or dropped by hand
    pub download_root: PathBuf,
    /// Working area; imports land in `<cache_root>/imports/<bug>`
    pub cache_root: PathBuf,
    /// How long an import waits for a bundle that is still being written
    pub ready_timeout_secs: u64,
    /// Poll interval while waiting
    pub ready_poll_millis: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env_vars(|key| std::env::var_os(key).map(PathBuf::from))
    }
}

impl AppConfig {
    /// Builds defaults from an environment lookup.
    ///
    /// Downloads go to `<home>/Downloads/SfLensLogs`, where home is
    /// `USERPROFILE` or `HOME`. The cache is `LOCALAPPDATA/sflens`, else
    /// `XDG_CACHE_HOME/sflens`, else `<home>/.cache/sflens`.
    pub fn from_env_vars(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let home = lookup("USERPROFILE")
            .or_else(|| lookup("HOME"))
            .unwrap_or_else(|| PathBuf::from("."));

        let cache_base = lookup("LOCALAPPDATA")
            .or_else(|| lookup("XDG_CACHE_HOME"))
            .unwrap_or_else(|| home.join(".cache"));

        Self {
            download_root: home.join("Downloads").join(DOWNLOAD_DIR),
            cache_root: cache_base.join(APP_DIR),
            ready_timeout_secs: 45,
            ready_poll_millis: 800,
        }
    }

    /// Reads a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Loads the file if given, otherwise the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides
    pub fn with_overrides(
        mut self,
        download_root: Option<PathBuf>,
        cache_root: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = download_root {
            self.download_root = dir;
        }
        if let Some(dir) = cache_root {
            self.cache_root = dir;
        }
        self
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn ready_poll(&self) -> Duration {
        Duration::from_millis(self.ready_poll_millis.max(1))
    }
}
