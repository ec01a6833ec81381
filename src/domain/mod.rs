//! Domain layer - Core business logic
//!
//! Entities, the archive reader contract, and the classification and
//! ranking services. Nothing here touches the filesystem.

pub mod entities;
pub mod repositories;
pub mod services;
