//! Repository traits (interfaces)
//!
//! Contracts for the container backends implemented in the infrastructure
//! layer.

mod archive_reader;

pub use archive_reader::{ArchiveReader, EntryVisitor};
