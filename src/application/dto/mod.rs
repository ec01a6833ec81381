//! Data Transfer Objects

mod bundle;
mod import_result;

pub use bundle::BundleFile;
pub use import_result::{
    ImportManifest, ImportOptions, ImportOutcome, ImportResult, MANIFEST_FILE_NAME,
};
