//! Directory tree listing
//!
//! Presents the files of an extracted bundle as archive entries so the same
//! classifier and ranker apply, with real modification times.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::{ArchiveError, Result};
use crate::domain::entities::ArchiveEntry;

/// Lists every regular file below `root`, paths relative to `root`.
///
/// Unreadable subdirectories are skipped. Symbolic links are not followed.
pub fn list_files(root: &Path) -> Result<Vec<ArchiveEntry>> {
    if !root.is_dir() {
        return Err(ArchiveError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        files.push(
            ArchiveEntry::file(relative.to_string_lossy().into_owned()).with_modified(modified),
        );
    }

    Ok(files)
}
