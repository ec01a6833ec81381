//! Import bundle use case
//!
//! Takes a downloaded bug bundle from the download folder into the import
//! cache: wait for the download, scan, extract the candidates and record the
//! picks in an `import.json` manifest.

use super::dto::{
    BundleFile, ImportManifest, ImportOptions, ImportOutcome, ImportResult, MANIFEST_FILE_NAME,
};
use super::{
    BugSession, DiscoverLogsUseCase, ExtractEntriesUseCase, ProgressCallback, ScanArchiveUseCase,
};
use crate::domain::entities::{
    ArchiveFormat, ExtractionReport, ExtractionRequest, LogProjectCandidates, ScanWarning,
};
use crate::infrastructure::archive::resolve_format;
use crate::infrastructure::readiness::wait_until_ready;
use anyhow::{Context, Result};
use chrono::Local;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Candidates on disk plus the extraction report, or why there are none
type Imported = std::result::Result<(LogProjectCandidates, ExtractionReport), ScanWarning>;

/// Lists `.zip`, `.7z` and `.rar` files directly inside the session's
/// download directory, newest first. Creates the directory if missing.
pub fn list_bundles(session: &BugSession) -> Result<Vec<BundleFile>> {
    let dir = session.ensure_download_dir()?;

    let mut bundles = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read download directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let Some(format) = ArchiveFormat::from_extension(&path) else {
            continue;
        };
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        bundles.push(BundleFile {
            path,
            format,
            size: meta.len(),
            modified: meta.modified().ok(),
        });
    }

    bundles.sort_by_key(|b| Reverse(b.modified));
    Ok(bundles)
}

/// Import bundle use case
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportBundleUseCase {
    scan: ScanArchiveUseCase,
    extract: ExtractEntriesUseCase,
    discover: DiscoverLogsUseCase,
}

impl ImportBundleUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports `archive` for the session's bug.
    ///
    /// A bundle without any SF log ends with [`ImportOutcome::NoSfLogs`] and
    /// leaves nothing behind in the import cache.
    pub fn execute(
        &self,
        session: &BugSession,
        archive: &Path,
        options: &ImportOptions,
        progress: Option<&ProgressCallback>,
    ) -> Result<ImportOutcome> {
        info!(
            bug = session.bug_id(),
            archive = %archive.display(),
            full = options.full,
            "starting import"
        );

        wait_until_ready(archive, options.ready_timeout, options.ready_poll)?;
        let format = resolve_format(archive)?;

        let imported = if options.full {
            self.import_full(session, archive, progress)?
        } else {
            self.import_candidates(session, archive, progress)?
        };

        let (candidates, report) = match imported {
            Ok(done) => done,
            Err(warning) => {
                warn!(bug = session.bug_id(), "{}", warning);
                return Ok(ImportOutcome::NoSfLogs(warning));
            }
        };

        let manifest = ImportManifest {
            bug_id: session.bug_id().to_string(),
            archive: archive.to_path_buf(),
            format,
            extract_dir: candidates.root.clone(),
            full: options.full,
            imported_at: Local::now().to_rfc3339(),
            selected: candidates.best(),
            candidates,
        };
        let manifest_path = write_manifest(&manifest)?;

        info!(
            bug = session.bug_id(),
            extract_dir = %manifest.extract_dir.display(),
            sf_log = ?manifest.selected.sf_log,
            "import complete"
        );

        Ok(ImportOutcome::Imported(Box::new(ImportResult {
            manifest,
            manifest_path,
            report,
        })))
    }

    /// Extracts only the scanned candidates and maps them to disk paths
    fn import_candidates(
        &self,
        session: &BugSession,
        archive: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<Imported> {
        let set = self.scan.execute(archive)?;
        if let Some(warning) = set.warning(archive) {
            return Ok(Err(warning));
        }

        let extract_dir = session.create_extract_dir(Local::now())?;
        let request = ExtractionRequest::new(archive, &extract_dir, set.all_candidates());
        let report = self.extract.execute(&request, progress)?;

        let on_disk = |entries: &[String]| -> Vec<PathBuf> {
            entries
                .iter()
                .filter_map(|e| report.output_path(e))
                .filter(|p| p.is_file())
                .map(Path::to_path_buf)
                .collect()
        };
        let candidates = LogProjectCandidates {
            root: extract_dir.clone(),
            sf_logs: on_disk(set.sf_log_entries()),
            screen_records: on_disk(set.video_entries()),
            android_logs: on_disk(set.android_log_entries()),
        };

        if candidates.sf_logs.is_empty() {
            // Listed but not extractable; surface the entry error if there is one.
            remove_quietly(&extract_dir);
            return match report.ensure_complete() {
                Err(error) => Err(error).context("SF log could not be extracted"),
                Ok(_) => Ok(Err(ScanWarning::NoSfLogs {
                    source: archive.to_path_buf(),
                })),
            };
        }

        Ok(Ok((candidates, report)))
    }

    /// Extracts everything, then discovers candidates on disk
    fn import_full(
        &self,
        session: &BugSession,
        archive: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<Imported> {
        let extract_dir = session.create_extract_dir(Local::now())?;
        let report = self.extract.extract_all(archive, &extract_dir, progress)?;
        let candidates = self.discover.discover_all(&extract_dir)?;

        if candidates.sf_logs.is_empty() {
            remove_quietly(&extract_dir);
            return Ok(Err(ScanWarning::NoSfLogs {
                source: archive.to_path_buf(),
            }));
        }

        Ok(Ok((candidates, report)))
    }
}

fn write_manifest(manifest: &ImportManifest) -> Result<PathBuf> {
    let path = manifest.extract_dir.join(MANIFEST_FILE_NAME);
    let json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    Ok(path)
}

fn remove_quietly(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "failed to remove empty import directory");
    }
}
