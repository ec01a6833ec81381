//! 7z backend
//!
//! Opening a 7z archive reads only its header block. Solid archives must be
//! decoded in order, so entries before the last requested one are decoded
//! and discarded.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sevenz_rust::{Password, SevenZReader};
use tracing::debug;

use crate::core::{ArchiveError, Result};
use crate::domain::entities::{ArchiveEntry, ArchiveFormat, EntryOutcome};
use crate::domain::repositories::{ArchiveReader, EntryVisitor};
use crate::infrastructure::persistence::EntryWriter;

pub struct SevenZipArchiveReader {
    path: PathBuf,
}

impl SevenZipArchiveReader {
    /// Opens the archive once to validate its header
    pub fn open(path: &Path) -> Result<Self> {
        let reader = Self {
            path: path.to_path_buf(),
        };
        reader.open_inner()?;
        Ok(reader)
    }

    fn open_inner(&self) -> Result<SevenZReader<std::fs::File>> {
        SevenZReader::open(&self.path, Password::empty())
            .map_err(|e| ArchiveError::unsupported(&self.path, e))
    }
}

impl ArchiveReader for SevenZipArchiveReader {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::SevenZip
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&mut self) -> Result<Vec<ArchiveEntry>> {
        let reader = self.open_inner()?;
        Ok(reader
            .archive()
            .files
            .iter()
            .map(|f| {
                if f.is_directory() {
                    ArchiveEntry::directory(f.name())
                } else {
                    ArchiveEntry::file(f.name())
                }
            })
            .collect())
    }

    fn extract(
        &mut self,
        wanted: &dyn Fn(&str) -> bool,
        destination: &Path,
        visit: EntryVisitor<'_>,
    ) -> Result<()> {
        let writer = EntryWriter::new(destination)
            .map_err(|e| ArchiveError::extraction(&self.path, "<destination>", e))?;
        let mut reader = self.open_inner()?;
        let archive_path = self.path.clone();

        reader
            .for_each_entries(|entry, data: &mut dyn Read| {
                let name = entry.name().to_string();
                if entry.is_directory() || name.trim().is_empty() || !wanted(&name) {
                    // Keep the solid stream aligned for the next entry.
                    if let Err(e) = io::copy(data, &mut io::sink()) {
                        debug!(entry = %name, error = %e, "failed to drain skipped 7z entry");
                    }
                    return Ok(true);
                }

                let outcome = match writer.write(&name, data) {
                    Ok((path, bytes)) => {
                        debug!(entry = %name, bytes, "extracted 7z entry");
                        EntryOutcome::Extracted {
                            entry: name,
                            path,
                            bytes,
                        }
                    }
                    Err(e) => {
                        if let Err(drain) = io::copy(data, &mut io::sink()) {
                            debug!(entry = %name, error = %drain, "failed to drain 7z entry");
                        }
                        EntryOutcome::Failed {
                            error: ArchiveError::extraction(&archive_path, &name, e),
                            entry: name,
                        }
                    }
                };

                Ok(visit(outcome))
            })
            .map_err(|e| ArchiveError::unsupported(&self.path, e))
    }
}
