//! Import options and results

use crate::domain::entities::{
    ArchiveFormat, ExtractionReport, LogProjectCandidates, LogProjectInfo, ScanWarning,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Name of the manifest written into every extract directory
pub const MANIFEST_FILE_NAME: &str = "import.json";

/// Options for an import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Extract the whole archive and discover candidates on disk
    pub full: bool,
    /// Maximum time to wait for the bundle to finish downloading
    pub ready_timeout: Duration,
    /// Poll interval while waiting
    pub ready_poll: Duration,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            full: false,
            ready_timeout: Duration::from_secs(45),
            ready_poll: Duration::from_millis(800),
        }
    }
}

/// The `import.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportManifest {
    pub bug_id: String,
    pub archive: PathBuf,
    pub format: ArchiveFormat,
    pub extract_dir: PathBuf,
    pub full: bool,
    /// Local time of the import, RFC 3339
    pub imported_at: String,
    pub selected: LogProjectInfo,
    pub candidates: LogProjectCandidates,
}

/// A finished import
#[derive(Debug)]
pub struct ImportResult {
    pub manifest: ImportManifest,
    pub manifest_path: PathBuf,
    pub report: ExtractionReport,
}

impl ImportResult {
    pub fn extract_dir(&self) -> &std::path::Path {
        &self.manifest.extract_dir
    }

    pub fn selected(&self) -> &LogProjectInfo {
        &self.manifest.selected
    }

    pub fn candidates(&self) -> &LogProjectCandidates {
        &self.manifest.candidates
    }
}

/// How an import ended
#[derive(Debug)]
pub enum ImportOutcome {
    Imported(Box<ImportResult>),
    /// The bundle holds no SF log; nothing was imported
    NoSfLogs(ScanWarning),
}
