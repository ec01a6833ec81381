//! RAR backend
//!
//! Wraps the unrar library. Headers are walked in order and unwanted
//! entries are skipped without decompression.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use unrar::Archive;

use crate::core::{ArchiveError, Result};
use crate::domain::entities::{ArchiveEntry, ArchiveFormat, EntryOutcome};
use crate::domain::repositories::{ArchiveReader, EntryVisitor};
use crate::infrastructure::persistence::EntryWriter;

pub struct RarArchiveReader {
    path: PathBuf,
}

impl RarArchiveReader {
    /// Opens the archive once to validate its main header
    pub fn open(path: &Path) -> Result<Self> {
        Archive::new(path)
            .open_for_listing()
            .map_err(|e| ArchiveError::unsupported(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl ArchiveReader for RarArchiveReader {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Rar
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&mut self) -> Result<Vec<ArchiveEntry>> {
        let listing = Archive::new(&self.path)
            .open_for_listing()
            .map_err(|e| ArchiveError::unsupported(&self.path, e))?;

        let mut out = Vec::new();
        for header in listing {
            let header = header.map_err(|e| ArchiveError::unsupported(&self.path, e))?;
            let name = header.filename.to_string_lossy().into_owned();
            out.push(if header.is_directory() {
                ArchiveEntry::directory(name)
            } else {
                ArchiveEntry::file(name)
            });
        }
        Ok(out)
    }

    fn extract(
        &mut self,
        wanted: &dyn Fn(&str) -> bool,
        destination: &Path,
        visit: EntryVisitor<'_>,
    ) -> Result<()> {
        let writer = EntryWriter::new(destination)
            .map_err(|e| ArchiveError::extraction(&self.path, "<destination>", e))?;
        let mut archive = Archive::new(&self.path)
            .open_for_processing()
            .map_err(|e| ArchiveError::unsupported(&self.path, e))?;

        while let Some(header) = archive
            .read_header()
            .map_err(|e| ArchiveError::unsupported(&self.path, e))?
        {
            let name = header.entry().filename.to_string_lossy().into_owned();
            if header.entry().is_directory() || name.trim().is_empty() || !wanted(&name) {
                archive = header
                    .skip()
                    .map_err(|e| ArchiveError::unsupported(&self.path, e))?;
                continue;
            }

            let out_path = match writer.prepare(&name) {
                Ok(path) => path,
                Err(e) => {
                    let keep_going = visit(EntryOutcome::Failed {
                        error: ArchiveError::extraction(&self.path, &name, e),
                        entry: name,
                    });
                    if !keep_going {
                        return Ok(());
                    }
                    archive = header
                        .skip()
                        .map_err(|e| ArchiveError::unsupported(&self.path, e))?;
                    continue;
                }
            };

            match header.extract_to(&out_path) {
                Ok(next) => {
                    let bytes = fs::metadata(&out_path).map(|m| m.len()).unwrap_or(0);
                    writer.record(bytes);
                    debug!(entry = %name, bytes, "extracted rar entry");
                    let keep_going = visit(EntryOutcome::Extracted {
                        entry: name,
                        path: out_path,
                        bytes,
                    });
                    if !keep_going {
                        return Ok(());
                    }
                    archive = next;
                }
                Err(e) => {
                    // The handle is consumed on failure, so the remaining
                    // entries cannot be reached.
                    warn!(entry = %name, error = %e, "rar extraction stopped");
                    visit(EntryOutcome::Failed {
                        error: ArchiveError::extraction(&self.path, &name, io::Error::other(e)),
                        entry: name,
                    });
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}
