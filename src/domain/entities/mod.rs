//! Domain entities
//!
//! Plain data describing archive entries, classified candidates and
//! extraction runs.

mod archive_entry;
mod archive_format;
mod artifact;
mod candidate_set;
mod extraction;
mod log_project;

pub use archive_entry::{
    ArchiveEntry, contains_segments, entry_key, file_name, normalize_separators, separator_count,
};
pub use archive_format::{ArchiveFormat, RAR_MAGIC, SEVEN_ZIP_MAGIC, SNIFF_LEN};
pub use artifact::ArtifactKind;
pub use candidate_set::{CandidateSet, ScanWarning};
pub use extraction::{
    EntryOutcome, EntrySelection, ExtractedFile, ExtractionProgress, ExtractionReport,
    ExtractionRequest,
};
pub use log_project::{LogProjectCandidates, LogProjectInfo};
