//! Infrastructure layer
//!
//! Concrete archive backends, filesystem listing and output writing.
//! All third-party archive libraries live behind this layer.

pub mod archive;
pub mod discovery;
pub mod persistence;
pub mod readiness;
