//! Scan archive use case
//!
//! Lists an archive once and turns its entries into ranked candidates.

use crate::core::Result;
use crate::domain::entities::{ArchiveEntry, CandidateSet, contains_segments};
use crate::domain::services::{CandidateClassifier, CandidateRanker, SF_RAW_SEGMENTS};
use crate::infrastructure::archive::open_archive;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Classifies and ranks the entries of one archive
///
/// Only the container directory is read; no entry is decompressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanArchiveUseCase {
    classifier: CandidateClassifier,
    ranker: CandidateRanker,
}

impl ScanArchiveUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the archive at `path`
    pub fn execute(&self, path: &Path) -> Result<CandidateSet> {
        let start = Instant::now();
        let mut reader = open_archive(path)?;
        let entries = reader.entries()?;

        let candidates = self.candidates(&entries);

        info!(
            archive = %path.display(),
            format = %reader.format(),
            entries = entries.len(),
            sf_logs = candidates.sf_log_entries().len(),
            android_logs = candidates.android_log_entries().len(),
            videos = candidates.video_entries().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(candidates)
    }

    /// Classifies and ranks an already listed set of entries
    pub fn candidates(&self, entries: &[ArchiveEntry]) -> CandidateSet {
        self.ranker.rank_all(&self.classifier.partition(entries))
    }

    /// Quick check for a raw capture: an `sf_logs.txt` below
    /// `display/sf/raw/`. Loose copies elsewhere do not count.
    pub fn contains_sf_logs(&self, path: &Path) -> Result<bool> {
        let mut reader = open_archive(path)?;
        Ok(reader.entries()?.iter().any(|e| {
            !e.is_dir()
                && CandidateClassifier::is_sf_log(e.path())
                && contains_segments(e.path(), SF_RAW_SEGMENTS)
        }))
    }
}
