//! Candidate classifier service
//!
//! Sorts entry paths into SF logs, Android logs and screen recordings using
//! file-name rules only. Bundle layouts vary between devices and pipeline
//! versions, so nothing here depends on the folder structure.

use crate::domain::entities::{ArchiveEntry, ArtifactKind, entry_key, file_name};
use std::collections::HashSet;

/// File name of the compositor capture
pub const SF_LOG_FILE_NAME: &str = "sf_logs.txt";

/// Prefix of per-boot Android log files
pub const ANDROID_LOG_PREFIX: &str = "android_log_";

/// Extensions treated as screen recordings
pub const VIDEO_EXTENSIONS: [&str; 9] = [
    "mp4", "mkv", "avi", "mov", "wmv", "webm", "3gp", "m4v", "flv",
];

/// Entries split by artifact kind, deduplicated, in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub sf_logs: Vec<ArchiveEntry>,
    pub android_logs: Vec<ArchiveEntry>,
    pub videos: Vec<ArchiveEntry>,
}

impl Classification {
    /// Returns the bucket for one kind
    pub fn bucket(&self, kind: ArtifactKind) -> &[ArchiveEntry] {
        match kind {
            ArtifactKind::SfLog => &self.sf_logs,
            ArtifactKind::AndroidLog => &self.android_logs,
            ArtifactKind::ScreenRecord => &self.videos,
        }
    }

    fn bucket_mut(&mut self, kind: ArtifactKind) -> &mut Vec<ArchiveEntry> {
        match kind {
            ArtifactKind::SfLog => &mut self.sf_logs,
            ArtifactKind::AndroidLog => &mut self.android_logs,
            ArtifactKind::ScreenRecord => &mut self.videos,
        }
    }
}

/// Stateless path classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateClassifier;

impl CandidateClassifier {
    pub fn new() -> Self {
        Self
    }

    /// `sf_logs.txt`, any case, any directory
    pub fn is_sf_log(path: &str) -> bool {
        file_name(path).eq_ignore_ascii_case(SF_LOG_FILE_NAME)
    }

    /// `android_log_*.txt`, any case
    pub fn is_android_log(path: &str) -> bool {
        let name = file_name(path).to_ascii_lowercase();
        name.starts_with(ANDROID_LOG_PREFIX) && name.ends_with(".txt")
    }

    /// Any of [`VIDEO_EXTENSIONS`], any case
    pub fn is_video(path: &str) -> bool {
        match file_name(path).rsplit_once('.') {
            Some((_, ext)) => VIDEO_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate)),
            None => false,
        }
    }

    /// Returns the first matching kind, checking SF, Android, then video
    pub fn classify_path(path: &str) -> Option<ArtifactKind> {
        if Self::is_sf_log(path) {
            Some(ArtifactKind::SfLog)
        } else if Self::is_android_log(path) {
            Some(ArtifactKind::AndroidLog)
        } else if Self::is_video(path) {
            Some(ArtifactKind::ScreenRecord)
        } else {
            None
        }
    }

    /// Partitions regular, named entries by kind.
    ///
    /// Directory entries and blank names are ignored. Within each kind the
    /// first spelling of a case-insensitive duplicate is kept.
    pub fn partition(&self, entries: &[ArchiveEntry]) -> Classification {
        let mut out = Classification::default();
        let mut seen = HashSet::new();

        for entry in entries.iter().filter(|e| !e.is_dir() && e.has_name()) {
            let Some(kind) = Self::classify_path(entry.path()) else {
                continue;
            };
            if seen.insert(entry_key(entry.path())) {
                out.bucket_mut(kind).push(entry.clone());
            }
        }

        out
    }
}
