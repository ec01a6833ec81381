//! Download readiness
//!
//! Bundles are often still being written by a browser or downloader when an
//! import starts. A file counts as ready once its size and modification time
//! hold still for two consecutive polls and its header can be read.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use tracing::debug;

use crate::core::{ArchiveError, Result};

/// Smallest file that can hold any supported container header
pub const MIN_READY_LEN: u64 = 32;

const STABLE_POLLS: u32 = 2;

/// Blocks until `path` looks completely written, or fails with `NotReady`
pub fn wait_until_ready(path: &Path, timeout: Duration, poll: Duration) -> Result<()> {
    let start = Instant::now();
    let mut last: Option<(u64, SystemTime)> = None;
    let mut stable = 0u32;

    loop {
        if let Ok(meta) = path.metadata() {
            let len = meta.len();
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);

            if len > 0 && last == Some((len, modified)) {
                stable += 1;
            } else {
                stable = 0;
            }
            last = Some((len, modified));

            if stable >= STABLE_POLLS && header_readable(path) {
                debug!(path = %path.display(), len, "archive ready");
                return Ok(());
            }
        }

        if start.elapsed() >= timeout {
            return Err(ArchiveError::NotReady {
                path: path.to_path_buf(),
                waited_secs: start.elapsed().as_secs(),
            });
        }
        thread::sleep(poll);
    }
}

fn header_readable(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let long_enough = file
        .metadata()
        .map(|m| m.len() >= MIN_READY_LEN)
        .unwrap_or(false);
    let mut header = [0u8; 8];
    long_enough && file.read_exact(&mut header).is_ok()
}
