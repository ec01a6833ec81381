//! Extract entries use case
//!
//! Materializes a chosen subset of an archive (or all of it) under a
//! destination directory and reports per-entry outcomes.

use crate::core::{ArchiveError, Result};
use crate::domain::entities::{
    EntryOutcome, EntrySelection, ExtractionProgress, ExtractionReport, ExtractionRequest,
    entry_key,
};
use crate::infrastructure::archive::open_archive;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(&ExtractionProgress) + Send + Sync>;

/// Full extraction reports progress every this many entries
const FULL_PROGRESS_INTERVAL: usize = 8;

/// Extract entries use case
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractEntriesUseCase;

impl ExtractEntriesUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Extracts exactly the requested entries.
    ///
    /// Reading stops as soon as every requested entry has been seen. Entry
    /// failures end up in the report; only opening the archive or creating
    /// the destination is fatal.
    pub fn execute(
        &self,
        request: &ExtractionRequest,
        progress: Option<&ProgressCallback>,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let archive = request.archive_path.as_path();

        let selection = EntrySelection::new(&request.entries);
        if selection.is_empty() {
            return Err(ArchiveError::EmptySelection {
                path: archive.to_path_buf(),
            });
        }

        let mut reader = open_archive(archive)?;
        let total = selection.len();
        info!(
            archive = %archive.display(),
            destination = %request.destination.display(),
            requested = total,
            "starting extraction"
        );

        let mut report = ExtractionReport::new(archive, &request.destination);
        let mut seen: HashSet<String> = HashSet::new();
        let mut seen_paths: Vec<String> = Vec::new();

        let wanted = |name: &str| selection.matches(name).is_some();
        reader.extract(
            &wanted,
            &request.destination,
            &mut |outcome: EntryOutcome| {
                let entry = outcome.entry().to_string();
                log_outcome(&outcome);
                report.record(outcome);

                if seen.insert(entry_key(&entry)) {
                    seen_paths.push(entry.clone());
                    if let Some(callback) = progress {
                        callback(&ExtractionProgress::new(seen.len(), total, entry));
                    }
                }
                seen.len() < total
            },
        )?;

        report.missing = selection.missing(seen_paths.iter().map(String::as_str));
        for entry in &report.missing {
            warn!(archive = %archive.display(), entry = %entry, "requested entry not in archive");
        }

        if let Some(callback) = progress {
            callback(&ExtractionProgress::new(total, total, ""));
        }

        report.duration = start.elapsed();
        info!(
            archive = %archive.display(),
            extracted = report.extracted.len(),
            failed = report.failed.len(),
            missing = report.missing.len(),
            elapsed_ms = report.duration.as_millis() as u64,
            "extraction complete"
        );

        Ok(report)
    }

    /// Extracts every regular entry after clearing `destination`
    pub fn extract_all(
        &self,
        archive: &Path,
        destination: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut reader = open_archive(archive)?;
        let total = reader
            .entries()?
            .iter()
            .filter(|e| !e.is_dir() && e.has_name())
            .count();

        if destination.exists() {
            fs::remove_dir_all(destination)
                .map_err(|e| ArchiveError::extraction(archive, "<destination>", e))?;
        }
        info!(
            archive = %archive.display(),
            destination = %destination.display(),
            entries = total,
            "starting full extraction"
        );

        let mut report = ExtractionReport::new(archive, destination);
        let mut done = 0usize;

        reader.extract(
            &|_: &str| true,
            destination,
            &mut |outcome: EntryOutcome| {
                done += 1;
                if done % FULL_PROGRESS_INTERVAL == 0 {
                    if let Some(callback) = progress {
                        callback(&ExtractionProgress::new(done, total, outcome.entry()));
                    }
                }
                log_outcome(&outcome);
                report.record(outcome);
                true
            },
        )?;

        if let Some(callback) = progress {
            callback(&ExtractionProgress::new(total, total, ""));
        }

        report.duration = start.elapsed();
        info!(
            archive = %archive.display(),
            extracted = report.extracted.len(),
            failed = report.failed.len(),
            elapsed_ms = report.duration.as_millis() as u64,
            "full extraction complete"
        );

        Ok(report)
    }

    /// Runs [`execute`](Self::execute) on tokio's blocking pool.
    ///
    /// The callback is invoked on the worker thread.
    pub async fn extract_in_background(
        &self,
        request: ExtractionRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<ExtractionReport> {
        let use_case = *self;
        tokio::task::spawn_blocking(move || use_case.execute(&request, progress.as_ref()))
            .await
            .map_err(|e| ArchiveError::Worker(e.to_string()))?
    }
}

fn log_outcome(outcome: &EntryOutcome) {
    match outcome {
        EntryOutcome::Extracted { .. } => {}
        EntryOutcome::Skipped { entry, reason } => {
            warn!(entry = %entry, reason = %reason, "entry skipped")
        }
        EntryOutcome::Failed { entry, error } => {
            warn!(entry = %entry, error = %error, "entry failed")
        }
    }
}
