//! Candidate set entity
//!
//! The classified and ranked view of one archive scan.

use super::archive_entry::entry_key;
use super::artifact::ArtifactKind;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions noticed during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// No `sf_logs.txt` anywhere in the bundle
    NoSfLogs { source: PathBuf },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::NoSfLogs { source } => write!(
                f,
                "no sf_logs.txt found in {} (not an SF log bundle or unexpected layout)",
                source.display()
            ),
        }
    }
}

/// Ranked candidate entries, best first, one list per artifact kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    sf_log_entries: Vec<String>,
    android_log_entries: Vec<String>,
    video_entries: Vec<String>,
}

impl CandidateSet {
    /// Creates a candidate set from already ranked lists
    pub fn new(
        sf_log_entries: Vec<String>,
        android_log_entries: Vec<String>,
        video_entries: Vec<String>,
    ) -> Self {
        Self {
            sf_log_entries,
            android_log_entries,
            video_entries,
        }
    }

    pub fn sf_log_entries(&self) -> &[String] {
        &self.sf_log_entries
    }

    pub fn android_log_entries(&self) -> &[String] {
        &self.android_log_entries
    }

    pub fn video_entries(&self) -> &[String] {
        &self.video_entries
    }

    /// Returns the list for one kind
    pub fn entries(&self, kind: ArtifactKind) -> &[String] {
        match kind {
            ArtifactKind::SfLog => &self.sf_log_entries,
            ArtifactKind::AndroidLog => &self.android_log_entries,
            ArtifactKind::ScreenRecord => &self.video_entries,
        }
    }

    /// Returns the top-ranked SF log, if any
    pub fn best_sf_log(&self) -> Option<&str> {
        self.sf_log_entries.first().map(String::as_str)
    }

    /// Total number of candidates across all kinds
    pub fn len(&self) -> usize {
        self.sf_log_entries.len() + self.android_log_entries.len() + self.video_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the empty-result warning when no SF log was found
    pub fn warning(&self, source: impl Into<PathBuf>) -> Option<ScanWarning> {
        if self.sf_log_entries.is_empty() {
            Some(ScanWarning::NoSfLogs {
                source: source.into(),
            })
        } else {
            None
        }
    }

    /// The usual extraction set: best SF log, every Android log and every
    /// recording.
    pub fn default_selection(&self) -> Vec<String> {
        self.best_sf_log()
            .into_iter()
            .map(str::to_string)
            .chain(self.android_log_entries.iter().cloned())
            .chain(self.video_entries.iter().cloned())
            .collect()
    }

    /// Every candidate of every kind, deduplicated case-insensitively
    pub fn all_candidates(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        ArtifactKind::ALL
            .iter()
            .flat_map(|kind| self.entries(*kind).iter())
            .filter(|path| seen.insert(entry_key(path)))
            .cloned()
            .collect()
    }
}
