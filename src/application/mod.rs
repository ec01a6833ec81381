//! Application layer
//!
//! Use cases that orchestrate domain logic over the archive backends.

pub mod dto;
mod discover_logs;
mod extract_entries;
mod import_bundle;
mod scan_archive;
mod session;

pub use discover_logs::DiscoverLogsUseCase;
pub use extract_entries::{ExtractEntriesUseCase, ProgressCallback};
pub use import_bundle::{ImportBundleUseCase, list_bundles};
pub use scan_archive::ScanArchiveUseCase;
pub use session::BugSession;
