//! Archive reader trait
//!
//! Defines the interface every container backend (zip, 7z, rar) implements.

use crate::core::Result;
use crate::domain::entities::{ArchiveEntry, ArchiveFormat, EntryOutcome};
use std::path::Path;

/// Callback receiving each entry outcome. Returning `false` stops reading.
pub type EntryVisitor<'a> = &'a mut dyn FnMut(EntryOutcome) -> bool;

/// Read-only access to an opened archive
///
/// Implementations never modify the archive. Listing must read only the
/// container's directory structures, not entry contents.
///
/// # Example
///
/// ```ignore
/// let mut reader = open_archive(Path::new("bug123.zip"))?;
/// for entry in reader.entries()? {
///     println!("{}", entry.path());
/// }
/// ```
pub trait ArchiveReader {
    /// Returns the container format
    fn format(&self) -> ArchiveFormat;

    /// Returns the archive path
    fn path(&self) -> &Path;

    /// Lists every entry, directories included
    fn entries(&mut self) -> Result<Vec<ArchiveEntry>>;

    /// Extracts regular entries accepted by `wanted` under `destination`,
    /// keeping their relative paths.
    ///
    /// Every accepted entry produces exactly one outcome. Per-entry problems
    /// are reported as [`EntryOutcome::Failed`] or [`EntryOutcome::Skipped`];
    /// only failures that make the rest of the archive unreadable are
    /// returned as errors.
    fn extract(
        &mut self,
        wanted: &dyn Fn(&str) -> bool,
        destination: &Path,
        visit: EntryVisitor<'_>,
    ) -> Result<()>;
}
