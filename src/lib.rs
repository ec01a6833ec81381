//! sflens
//!
//! Finds SurfaceFlinger logs, Android logs and screen recordings inside
//! bug-report archives (zip, 7z, rar), ranks the candidates and extracts only
//! the selected entries.

pub mod application;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::core::{ArchiveError, Result};
