//! Bundle listing entry

use crate::domain::entities::ArchiveFormat;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// An archive sitting in a bug's download directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub path: PathBuf,
    pub format: ArchiveFormat,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl BundleFile {
    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
