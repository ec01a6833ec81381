//! Archive entry entity
//!
//! A single file listed inside a bug bundle, plus the path helpers used to
//! compare entry names regardless of separator style or letter case.

use std::time::SystemTime;

/// A file or directory listed by an archive reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path exactly as stored in the archive (either separator style)
    path: String,
    /// Whether the archive marks this entry as a directory
    is_dir: bool,
    /// Last modification time, when the source exposes one
    modified: Option<SystemTime>,
}

impl ArchiveEntry {
    /// Creates a regular file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
            modified: None,
        }
    }

    /// Creates a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
            modified: None,
        }
    }

    /// Attaches a modification time
    pub fn with_modified(mut self, modified: Option<SystemTime>) -> Self {
        self.modified = modified;
        self
    }

    /// Returns the raw entry path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true for directory entries
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns the modification time if known
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns the final path component
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }

    /// Returns true if the entry has a usable, non-blank name
    pub fn has_name(&self) -> bool {
        !self.path.trim().is_empty()
    }
}

/// Rewrites backslashes to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Case- and separator-insensitive identity of an entry path.
///
/// Leading `./` and `/` are ignored so `./a/b.txt`, `/a/b.txt` and `A\B.TXT`
/// all compare equal.
pub fn entry_key(path: &str) -> String {
    let normalized = normalize_separators(path).to_lowercase();
    let mut key = normalized.as_str();
    loop {
        if let Some(rest) = key.strip_prefix("./") {
            key = rest;
        } else if let Some(rest) = key.strip_prefix('/') {
            key = rest;
        } else {
            break;
        }
    }
    key.to_string()
}

/// Returns the last component of a path written with either separator.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Counts path separators of both styles.
pub fn separator_count(path: &str) -> usize {
    path.chars().filter(|c| *c == '/' || *c == '\\').count()
}

/// Checks whether `path` contains the directory sequence `segments`
/// (e.g. `"display/sf/raw/"`), matching whole segments only.
///
/// The start of the path counts as a segment boundary.
pub fn contains_segments(path: &str, segments: &str) -> bool {
    let haystack = format!("/{}", normalize_separators(path).to_lowercase());
    let needle = format!("/{}", normalize_separators(segments).to_lowercase());
    haystack.contains(&needle)
}
