//! Log project entities
//!
//! Candidates found in an extracted directory tree, as opposed to inside an
//! archive.

use serde::Serialize;
use std::path::PathBuf;

/// All ranked candidates under an extracted root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogProjectCandidates {
    pub root: PathBuf,
    pub sf_logs: Vec<PathBuf>,
    pub screen_records: Vec<PathBuf>,
    pub android_logs: Vec<PathBuf>,
}

impl LogProjectCandidates {
    /// Projects the best default of each kind
    pub fn best(&self) -> LogProjectInfo {
        LogProjectInfo {
            root: self.root.clone(),
            sf_log: self.sf_logs.first().cloned(),
            screen_record: self.screen_records.first().cloned(),
            android_logs: self.android_logs.clone(),
        }
    }

    /// Returns true if any list holds more than one choice
    pub fn has_alternatives(&self) -> bool {
        self.sf_logs.len() > 1 || self.screen_records.len() > 1 || self.android_logs.len() > 1
    }
}

/// The default picks handed to the viewer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogProjectInfo {
    pub root: PathBuf,
    pub sf_log: Option<PathBuf>,
    pub screen_record: Option<PathBuf>,
    pub android_logs: Vec<PathBuf>,
}
