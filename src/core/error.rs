use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, listing or extracting a bug bundle
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Unsupported or corrupt archive {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("Failed to extract '{entry}' from {}: {source}", path.display())]
    Extraction {
        path: PathBuf,
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("No entries selected for extraction from {}", path.display())]
    EmptySelection { path: PathBuf },

    #[error("Archive {} was not ready after {waited_secs}s", path.display())]
    NotReady { path: PathBuf, waited_secs: u64 },

    #[error("Background extraction worker failed: {0}")]
    Worker(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ArchiveError {
    pub(crate) fn unsupported(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn extraction(path: impl Into<PathBuf>, entry: &str, source: io::Error) -> Self {
        Self::Extraction {
            path: path.into(),
            entry: entry.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
