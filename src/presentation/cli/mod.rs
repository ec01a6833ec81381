//! CLI module

mod commands;
mod picker;
mod progress;

pub use commands::{Cli, Commands};
pub use picker::{pick_bundle, pick_entry};
pub use progress::ProgressReporter;
