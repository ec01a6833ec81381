//! Archive fixtures shared by the integration tests

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Layout of a typical bug bundle
pub const BUG123_ENTRIES: &[(&str, &[u8])] = &[
    ("a/display/sf/raw/sf_logs.txt", b"raw sf trace"),
    ("b/display/sf/sf_logs.txt", b"processed sf trace"),
    ("c/sf_logs.txt", b"loose sf trace"),
    ("android_log_1.txt", b"boot 1"),
    ("android_log_2.TXT", b"boot 2"),
    ("video/screen_record/rec.mp4", b"\x00\x00\x00\x18ftypmp42"),
    ("notes.md", b"# notes"),
];

/// Writes a zip with the given entries; names ending in `/` become
/// directories.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }
    zip.finish().unwrap();
    path.to_path_buf()
}

/// Writes a 7z built from a directory tree of the given entries
pub fn write_7z(path: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let staging = tempfile::TempDir::new().unwrap();
    write_tree(staging.path(), entries);
    sevenz_rust::compress_to_path(staging.path(), path).unwrap();
    path.to_path_buf()
}

/// Path of a checked-in archive under `tests/fixtures`.
///
/// `bug123.rar` holds the [`BUG123_ENTRIES`] layout plus a `video`
/// directory entry. `bad_crc.rar` holds `ok.txt`, `broken.txt` (stored
/// with a wrong checksum) and `after.txt`, in that order.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Materializes entries as plain files under `root`
pub fn write_tree(root: &Path, entries: &[(&str, &[u8])]) {
    for (name, data) in entries {
        let target = root.join(name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(target, data).unwrap();
    }
}

/// Normalizes a listed path to forward slashes for comparisons
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}
