//! Archive backends
//!
//! Picks a reader by extension, falling back to magic-byte detection for
//! anything that is not `.zip`, `.7z` or `.rar`.

mod rar_reader;
mod sevenz_reader;
mod zip_reader;

pub use rar_reader::RarArchiveReader;
pub use sevenz_reader::SevenZipArchiveReader;
pub use zip_reader::ZipArchiveReader;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::core::{ArchiveError, Result};
use crate::domain::entities::{ArchiveFormat, SNIFF_LEN};
use crate::domain::repositories::ArchiveReader;

/// Reads the first bytes of a file and identifies its container format
pub fn sniff_format(path: &Path) -> io::Result<Option<ArchiveFormat>> {
    let mut file = File::open(path)?;
    let mut header = [0u8; SNIFF_LEN];
    let mut filled = 0;
    while filled < header.len() {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(ArchiveFormat::detect(&header[..filled]))
}

/// Resolves the format used to open `path`
pub fn resolve_format(path: &Path) -> Result<ArchiveFormat> {
    if !path.is_file() {
        return Err(ArchiveError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if let Some(format) = ArchiveFormat::from_extension(path) {
        return Ok(format);
    }

    match sniff_format(path)? {
        Some(format) => {
            debug!(path = %path.display(), %format, "format detected from content");
            Ok(format)
        }
        None => Err(ArchiveError::unsupported(path, "unrecognized container")),
    }
}

/// Opens the archive at `path` with the matching backend
pub fn open_archive(path: &Path) -> Result<Box<dyn ArchiveReader>> {
    let format = resolve_format(path)?;
    let reader: Box<dyn ArchiveReader> = match format {
        ArchiveFormat::Zip => Box::new(ZipArchiveReader::open(path)?),
        ArchiveFormat::SevenZip => Box::new(SevenZipArchiveReader::open(path)?),
        ArchiveFormat::Rar => Box::new(RarArchiveReader::open(path)?),
    };
    Ok(reader)
}
