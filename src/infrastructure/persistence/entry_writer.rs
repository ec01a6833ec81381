//! Entry writer
//!
//! Materializes archive entries under a destination directory, keeping
//! their relative paths and refusing any path that would escape it.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::domain::entities::normalize_separators;

/// Writes extracted entries below one destination directory
#[derive(Debug)]
pub struct EntryWriter {
    destination: PathBuf,
    files_written: AtomicUsize,
    bytes_written: AtomicU64,
}

impl EntryWriter {
    /// Creates the destination directory if needed
    pub fn new(destination: &Path) -> io::Result<Self> {
        fs::create_dir_all(destination)?;
        Ok(Self {
            destination: destination.to_path_buf(),
            files_written: AtomicUsize::new(0),
            bytes_written: AtomicU64::new(0),
        })
    }

    /// Maps an entry path to its output path.
    ///
    /// Either separator is accepted. Root prefixes and `.` components are
    /// dropped; `..` and drive prefixes are rejected.
    pub fn resolve(&self, entry: &str) -> io::Result<PathBuf> {
        let normalized = normalize_separators(entry);
        let mut out = self.destination.clone();
        let mut depth = 0usize;

        for part in normalized.split('/') {
            if part.is_empty() || part == "." {
                continue;
            }
            if part == ".." || part.contains(':') {
                return Err(unsafe_path(entry));
            }
            match Path::new(part).components().next() {
                Some(Component::Normal(_)) => {
                    out.push(part);
                    depth += 1;
                }
                _ => return Err(unsafe_path(entry)),
            }
        }

        if depth == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("entry '{entry}' has no file name"),
            ));
        }
        Ok(out)
    }

    /// Resolves the output path and creates its parent directories
    pub fn prepare(&self, entry: &str) -> io::Result<PathBuf> {
        let path = self.resolve(entry)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Copies `data` to the entry's output path, overwriting any existing
    /// file. Returns the output path and the number of bytes written.
    pub fn write(&self, entry: &str, data: &mut dyn Read) -> io::Result<(PathBuf, u64)> {
        let path = self.prepare(entry)?;
        let mut out = BufWriter::new(File::create(&path)?);
        let bytes = io::copy(data, &mut out)?;
        out.flush()?;
        self.record(bytes);
        Ok((path, bytes))
    }

    /// Counts a file written by a backend that writes on its own
    pub fn record(&self, bytes: u64) {
        self.files_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn files_written(&self) -> usize {
        self.files_written.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}

fn unsafe_path(entry: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("entry '{entry}' would escape the destination directory"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_both_separator_styles() {
        let dir = TempDir::new().unwrap();
        let writer = EntryWriter::new(dir.path()).unwrap();
        assert_eq!(
            writer.resolve(r"a\b/c.txt").unwrap(),
            dir.path().join("a").join("b").join("c.txt")
        );
        assert_eq!(
            writer.resolve("/./a/c.txt").unwrap(),
            dir.path().join("a").join("c.txt")
        );
    }

    #[test]
    fn rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let writer = EntryWriter::new(dir.path()).unwrap();
        assert!(writer.resolve("../evil.txt").is_err());
        assert!(writer.resolve(r"a\..\..\evil.txt").is_err());
        assert!(writer.resolve("C:/evil.txt").is_err());
        assert!(writer.resolve("/").is_err());
    }

    #[test]
    fn write_overwrites_and_counts() {
        let dir = TempDir::new().unwrap();
        let writer = EntryWriter::new(dir.path()).unwrap();
        writer.write("x/y.txt", &mut &b"first"[..]).unwrap();
        let (path, bytes) = writer.write("x/y.txt", &mut &b"second"[..]).unwrap();
        assert_eq!(bytes, 6);
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
        assert_eq!(writer.files_written(), 2);
        assert_eq!(writer.bytes_written(), 11);
    }
}
