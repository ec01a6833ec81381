//! Domain services
//!
//! Classification and ranking of candidate paths.

mod classifier;
mod ranker;

pub use classifier::{
    ANDROID_LOG_PREFIX, CandidateClassifier, Classification, SF_LOG_FILE_NAME, VIDEO_EXTENSIONS,
};
pub use ranker::{
    CandidateRanker, RankedCandidate, SCREEN_RECORD_SEGMENTS, SF_RAW_SEGMENTS, SF_SEGMENTS,
};
