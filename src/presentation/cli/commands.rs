//! CLI commands using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// sflens - SurfaceFlinger log bundle tool
///
/// Finds SF logs, Android logs and screen recordings inside bug-report
/// archives and extracts only what is needed.
#[derive(Parser)]
#[command(name = "sflens")]
#[command(version)]
#[command(about = "Find and extract SF logs from bug-report bundles", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the per-bug download root
    #[arg(long, global = true, value_name = "DIR")]
    pub download_root: Option<PathBuf>,

    /// Override the cache root
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List SF log, Android log and video candidates with scores
    Scan {
        /// Archive to scan (.zip, .7z, .rar)
        archive: PathBuf,

        /// Print the candidate lists as JSON
        #[arg(long)]
        json: bool,
    },

    /// Exit with 0 if the archive holds an sf_logs.txt, 1 otherwise
    Check {
        /// Archive to check
        archive: PathBuf,
    },

    /// Extract candidates (or the given entries) from an archive
    Extract {
        /// Archive to read
        archive: PathBuf,

        /// Destination directory
        #[arg(short, long)]
        output: PathBuf,

        /// Entry path to extract; repeatable. Defaults to the best SF log
        /// plus every Android log and video.
        #[arg(short = 'e', long = "entry", value_name = "ENTRY")]
        entries: Vec<String>,

        /// Choose one entry per category interactively
        #[arg(long, conflicts_with = "entries")]
        pick: bool,
    },

    /// Find candidates in an already extracted directory
    Discover {
        /// Directory to walk
        dir: PathBuf,

        /// Print the candidates as JSON
        #[arg(long)]
        json: bool,
    },

    /// List downloaded bundles for a bug, newest first
    Bundles {
        /// Bug id
        #[arg(short, long)]
        bug: String,
    },

    /// Import a bundle into the cache and write import.json
    Import {
        /// Bug id
        #[arg(short, long)]
        bug: String,

        /// Bundle to import; prompts when omitted and several exist
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Extract the whole archive and discover candidates on disk
        #[arg(long)]
        full: bool,

        /// Seconds to wait for a bundle still being downloaded
        #[arg(long, value_name = "N")]
        wait_secs: Option<u64>,
    },
}
