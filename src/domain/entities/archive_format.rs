//! Archive container formats
//!
//! Identifies zip, 7z and rar containers by extension or by their leading
//! magic bytes.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Leading bytes of a 7z container
pub const SEVEN_ZIP_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];
/// Leading bytes shared by RAR4 and RAR5 containers
pub const RAR_MAGIC: [u8; 6] = [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07];
/// Bytes needed to tell every supported format apart
pub const SNIFF_LEN: usize = 6;

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    SevenZip,
    Rar,
}

impl ArchiveFormat {
    /// Returns the canonical file extension (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::SevenZip => "7z",
            ArchiveFormat::Rar => "rar",
        }
    }

    /// Returns a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "ZIP",
            ArchiveFormat::SevenZip => "7-Zip",
            ArchiveFormat::Rar => "RAR",
        }
    }

    /// Maps a `.zip` / `.7z` / `.rar` extension, any case
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "zip" => Some(ArchiveFormat::Zip),
            "7z" => Some(ArchiveFormat::SevenZip),
            "rar" => Some(ArchiveFormat::Rar),
            _ => None,
        }
    }

    /// Identifies a container from its first bytes.
    ///
    /// ZIP is `PK` followed by the local-header, end-of-directory or
    /// spanning marker bytes (`03|05|07` then `04|06|08`).
    pub fn detect(header: &[u8]) -> Option<Self> {
        if header.len() < 4 {
            return None;
        }

        if header[0] == b'P'
            && header[1] == b'K'
            && matches!(header[2], 3 | 5 | 7)
            && matches!(header[3], 4 | 6 | 8)
        {
            return Some(ArchiveFormat::Zip);
        }

        if header.starts_with(&SEVEN_ZIP_MAGIC) {
            return Some(ArchiveFormat::SevenZip);
        }

        if header.starts_with(&RAR_MAGIC) {
            return Some(ArchiveFormat::Rar);
        }

        None
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
