//! Discover logs use case
//!
//! Finds candidates in an already extracted directory tree.

use crate::core::Result;
use crate::domain::entities::{
    ArtifactKind, LogProjectCandidates, LogProjectInfo, contains_segments,
};
use crate::domain::services::{CandidateClassifier, CandidateRanker, Classification};
use crate::infrastructure::discovery::list_files;
use std::path::{Path, PathBuf};
use tracing::info;

/// Android logs on disk only count inside this directory sequence
pub const MINILOG_SEGMENTS: &str = "common/minilog/";

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoverLogsUseCase {
    classifier: CandidateClassifier,
    ranker: CandidateRanker,
}

impl DiscoverLogsUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranked candidates of every kind under `root`
    pub fn discover_all(&self, root: &Path) -> Result<LogProjectCandidates> {
        let files = list_files(root)?;
        let mut classification = self.classifier.partition(&files);
        classification
            .android_logs
            .retain(|e| contains_segments(e.path(), MINILOG_SEGMENTS));

        let candidates = LogProjectCandidates {
            root: root.to_path_buf(),
            sf_logs: self.ranked_paths(root, &classification, ArtifactKind::SfLog),
            screen_records: self.ranked_paths(root, &classification, ArtifactKind::ScreenRecord),
            android_logs: self.ranked_paths(root, &classification, ArtifactKind::AndroidLog),
        };

        info!(
            root = %root.display(),
            files = files.len(),
            sf_logs = candidates.sf_logs.len(),
            screen_records = candidates.screen_records.len(),
            android_logs = candidates.android_logs.len(),
            "discovery complete"
        );

        Ok(candidates)
    }

    /// The default pick of each kind under `root`
    pub fn discover(&self, root: &Path) -> Result<LogProjectInfo> {
        Ok(self.discover_all(root)?.best())
    }

    fn ranked_paths(
        &self,
        root: &Path,
        classification: &Classification,
        kind: ArtifactKind,
    ) -> Vec<PathBuf> {
        self.ranker
            .rank(kind, classification.bucket(kind))
            .into_iter()
            .map(|c| root.join(c.entry.path()))
            .collect()
    }
}
