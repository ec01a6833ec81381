//! Candidate ranker service
//!
//! Bundles often carry several copies of the same artifact taken at
//! different pipeline stages. Location and depth scoring picks the
//! authoritative capture without reading file contents.

use crate::domain::entities::{
    ArchiveEntry, ArtifactKind, CandidateSet, contains_segments, separator_count,
};
use crate::domain::services::Classification;
use std::cmp::Reverse;

/// Canonical raw-capture location of SF logs
pub const SF_RAW_SEGMENTS: &str = "display/sf/raw/";
/// Any SF capture location
pub const SF_SEGMENTS: &str = "display/sf/";
/// Recorder output location
pub const SCREEN_RECORD_SEGMENTS: &str = "screen_record/";

const SF_RAW_BONUS: u32 = 1000;
const SF_BONUS: u32 = 200;
const SF_DEPTH_CAP: usize = 80;
const VIDEO_LOCATION_BONUS: u32 = 500;
const VIDEO_DEPTH_CAP: usize = 60;

/// A candidate path with its score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub entry: ArchiveEntry,
    pub score: u32,
}

/// Stateless scorer and sorter
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRanker;

impl CandidateRanker {
    pub fn new() -> Self {
        Self
    }

    /// Scores a path for the given kind. Android logs always score 0.
    pub fn score(kind: ArtifactKind, path: &str) -> u32 {
        match kind {
            ArtifactKind::SfLog => {
                let location = if contains_segments(path, SF_RAW_SEGMENTS) {
                    SF_RAW_BONUS
                } else if contains_segments(path, SF_SEGMENTS) {
                    SF_BONUS
                } else {
                    0
                };
                location + separator_count(path).min(SF_DEPTH_CAP) as u32
            }
            ArtifactKind::ScreenRecord => {
                let location = if contains_segments(path, SCREEN_RECORD_SEGMENTS) {
                    VIDEO_LOCATION_BONUS
                } else {
                    0
                };
                location + separator_count(path).min(VIDEO_DEPTH_CAP) as u32
            }
            ArtifactKind::AndroidLog => 0,
        }
    }

    /// Orders entries best-first.
    ///
    /// Higher score wins; equal scores put the newest modification time
    /// first, entries without a time after those with one, and otherwise
    /// keep enumeration order (the sort is stable).
    pub fn rank(&self, kind: ArtifactKind, entries: &[ArchiveEntry]) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = entries
            .iter()
            .map(|entry| RankedCandidate {
                score: Self::score(kind, entry.path()),
                entry: entry.clone(),
            })
            .collect();

        ranked.sort_by_key(|c| (Reverse(c.score), Reverse(c.entry.modified())));
        ranked
    }

    /// Ranks every bucket of a classification into a candidate set
    pub fn rank_all(&self, classification: &Classification) -> CandidateSet {
        let ordered = |kind: ArtifactKind| -> Vec<String> {
            self.rank(kind, classification.bucket(kind))
                .into_iter()
                .map(|c| c.entry.path().to_string())
                .collect()
        };

        CandidateSet::new(
            ordered(ArtifactKind::SfLog),
            ordered(ArtifactKind::AndroidLog),
            ordered(ArtifactKind::ScreenRecord),
        )
    }
}
