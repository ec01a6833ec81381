//! Extraction entities
//!
//! Request, progress and report types for selective extraction.

use super::archive_entry::entry_key;
use crate::core::ArchiveError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which entries of which archive go where
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Archive to read from
    pub archive_path: PathBuf,
    /// Directory the entries are materialized under
    pub destination: PathBuf,
    /// Entry paths to extract, as listed by the scanner
    pub entries: Vec<String>,
}

impl ExtractionRequest {
    /// Creates a new extraction request
    pub fn new(
        archive_path: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            archive_path: archive_path.into(),
            destination: destination.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Lookup of requested entries by case- and separator-insensitive key
#[derive(Debug, Clone, Default)]
pub struct EntrySelection {
    wanted: HashMap<String, String>,
}

impl EntrySelection {
    /// Builds a selection, dropping blank paths and duplicates
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a String>) -> Self {
        let mut wanted = HashMap::new();
        for entry in entries {
            if entry.trim().is_empty() {
                continue;
            }
            wanted
                .entry(entry_key(entry))
                .or_insert_with(|| entry.clone());
        }
        Self { wanted }
    }

    /// Number of distinct requested entries
    pub fn len(&self) -> usize {
        self.wanted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wanted.is_empty()
    }

    /// Returns the requested spelling if `entry_path` was asked for
    pub fn matches(&self, entry_path: &str) -> Option<&str> {
        self.wanted.get(&entry_key(entry_path)).map(String::as_str)
    }

    /// Requested entries whose keys are not in `seen`, sorted
    pub fn missing<'a>(&self, seen: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let seen: std::collections::HashSet<String> = seen.into_iter().map(entry_key).collect();
        let mut missing: Vec<String> = self
            .wanted
            .iter()
            .filter(|(key, _)| !seen.contains(*key))
            .map(|(_, original)| original.clone())
            .collect();
        missing.sort();
        missing
    }
}

/// Progress of an extraction, reported after each processed entry
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionProgress {
    /// Entries processed so far
    pub done: usize,
    /// Entries to process in total
    pub total: usize,
    /// Entry that was just processed (empty for the final report)
    pub current: String,
}

impl ExtractionProgress {
    pub fn new(done: usize, total: usize, current: impl Into<String>) -> Self {
        Self {
            done,
            total,
            current: current.into(),
        }
    }

    /// Returns `done / total` in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.done as f64 / self.total as f64).min(1.0)
    }
}

/// What happened to a single entry
#[derive(Debug)]
pub enum EntryOutcome {
    /// Written to disk
    Extracted {
        entry: String,
        path: PathBuf,
        bytes: u64,
    },
    /// Not a regular file (link, stream-less metadata) and therefore skipped
    Skipped { entry: String, reason: String },
    /// Reading or writing failed
    Failed { entry: String, error: ArchiveError },
}

impl EntryOutcome {
    /// Returns the entry path this outcome is about
    pub fn entry(&self) -> &str {
        match self {
            EntryOutcome::Extracted { entry, .. }
            | EntryOutcome::Skipped { entry, .. }
            | EntryOutcome::Failed { entry, .. } => entry,
        }
    }
}

/// A file successfully materialized on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Entry path inside the archive
    pub entry: String,
    /// Output path under the destination
    pub path: PathBuf,
    /// Bytes written
    pub bytes: u64,
}

/// Result of an extraction run
#[derive(Debug)]
pub struct ExtractionReport {
    /// Archive that was read
    pub archive_path: PathBuf,
    /// Destination directory
    pub destination: PathBuf,
    /// Files written
    pub extracted: Vec<ExtractedFile>,
    /// Non-regular entries that were skipped, with the reason
    pub skipped: Vec<(String, String)>,
    /// Entries that could not be read or written
    pub failed: Vec<ArchiveError>,
    /// Requested entries absent from the archive
    pub missing: Vec<String>,
    /// Wall time of the run
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates an empty report
    pub fn new(archive_path: &Path, destination: &Path) -> Self {
        Self {
            archive_path: archive_path.to_path_buf(),
            destination: destination.to_path_buf(),
            extracted: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            missing: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Folds one entry outcome into the report
    pub fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Extracted { entry, path, bytes } => {
                self.extracted.push(ExtractedFile { entry, path, bytes })
            }
            EntryOutcome::Skipped { entry, reason } => self.skipped.push((entry, reason)),
            EntryOutcome::Failed { error, .. } => self.failed.push(error),
        }
    }

    /// Total bytes written
    pub fn bytes_written(&self) -> u64 {
        self.extracted.iter().map(|f| f.bytes).sum()
    }

    /// Output path of an extracted entry, matched case-insensitively
    pub fn output_path(&self, entry: &str) -> Option<&Path> {
        let key = entry_key(entry);
        self.extracted
            .iter()
            .find(|f| entry_key(&f.entry) == key)
            .map(|f| f.path.as_path())
    }

    /// Fails with the first per-entry error, if any
    pub fn ensure_complete(mut self) -> crate::core::Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(self.failed.remove(0))
        }
    }

    /// Returns a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Extracted {} file(s) ({} bytes) to {} in {:.2}s",
            self.extracted.len(),
            self.bytes_written(),
            self.destination.display(),
            self.duration.as_secs_f64()
        );
        if !self.skipped.is_empty() {
            summary.push_str(&format!("\n  skipped: {}", self.skipped.len()));
        }
        if !self.failed.is_empty() {
            summary.push_str(&format!("\n  failed:  {}", self.failed.len()));
        }
        if !self.missing.is_empty() {
            summary.push_str(&format!("\n  missing: {}", self.missing.len()));
        }
        summary
    }
}
