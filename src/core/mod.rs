//! Crate-wide error type

mod error;

pub use error::{ArchiveError, Result};
