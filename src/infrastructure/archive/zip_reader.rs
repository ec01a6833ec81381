//! ZIP backend
//!
//! Uses the central directory for listing; only requested entries are
//! decompressed.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::core::{ArchiveError, Result};
use crate::domain::entities::{ArchiveEntry, ArchiveFormat, EntryOutcome};
use crate::domain::repositories::{ArchiveReader, EntryVisitor};
use crate::infrastructure::persistence::EntryWriter;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

pub struct ZipArchiveReader {
    path: PathBuf,
    archive: ZipArchive<File>,
}

/// Per-index metadata read without decompressing anything
struct ZipListing {
    index: usize,
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

impl ZipArchiveReader {
    /// Opens the archive and reads its central directory
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file).map_err(|e| ArchiveError::unsupported(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    fn listing(&mut self) -> Result<Vec<ZipListing>> {
        let mut out = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self
                .archive
                .by_index_raw(index)
                .map_err(|e| ArchiveError::unsupported(&self.path, e))?;
            let is_symlink = file
                .unix_mode()
                .is_some_and(|mode| mode & S_IFMT == S_IFLNK);
            out.push(ZipListing {
                index,
                name: file.name().to_string(),
                is_dir: file.is_dir() || file.name().ends_with('\\'),
                is_symlink,
            });
        }
        Ok(out)
    }
}

impl ArchiveReader for ZipArchiveReader {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Zip
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&mut self) -> Result<Vec<ArchiveEntry>> {
        Ok(self
            .listing()?
            .into_iter()
            .map(|l| {
                if l.is_dir {
                    ArchiveEntry::directory(l.name)
                } else {
                    ArchiveEntry::file(l.name)
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

        for item in self.listing()? {
            if item.is_dir || item.name.trim().is_empty() || !wanted(&item.name) {
                continue;
            }

            let outcome = if item.is_symlink {
                EntryOutcome::Skipped {
                    entry: item.name,
                    reason: "symbolic link".to_string(),
                }
            } else {
                let written = match self.archive.by_index(item.index) {
                    Ok(mut file) => writer.write(&item.name, &mut file),
                    Err(e) => Err(io::Error::other(e)),
                };
                match written {
                    Ok((path, bytes)) => {
                        debug!(entry = %item.name, bytes, "extracted zip entry");
                        EntryOutcome::Extracted {
                            entry: item.name,
                            path,
                            bytes,
                        }
                    }
                    Err(e) => EntryOutcome::Failed {
                        error: ArchiveError::extraction(&self.path, &item.name, e),
                        entry: item.name,
                    },
                }
            };

            if !visit(outcome) {
                break;
            }
        }

        Ok(())
    }
}
