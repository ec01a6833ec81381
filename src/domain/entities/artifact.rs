//! Artifact kinds
//!
//! The three kinds of evidence a bug bundle is searched for.

use serde::Serialize;
use std::fmt;

/// Category an archive entry can be classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// `sf_logs.txt` compositor capture
    SfLog,
    /// `android_log_*.txt` device log
    AndroidLog,
    /// Screen recording in a common video container
    ScreenRecord,
}

impl ArtifactKind {
    /// All kinds, in classification priority order
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::SfLog,
        ArtifactKind::AndroidLog,
        ArtifactKind::ScreenRecord,
    ];

    /// Returns a human-readable label
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::SfLog => "SF logs",
            ArtifactKind::AndroidLog => "Android logs",
            ArtifactKind::ScreenRecord => "Screen record",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
