//! Domain layer unit tests
//!
//! Tests for entities and the classification/ranking services.

use proptest::prelude::*;
use rstest::*;
use sflens::domain::entities::{
    ArchiveEntry, ArchiveFormat, ArtifactKind, CandidateSet, EntrySelection, ExtractionProgress,
    LogProjectCandidates, ScanWarning, entry_key,
};
use sflens::domain::services::{CandidateClassifier, CandidateRanker};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

fn files(paths: &[&str]) -> Vec<ArchiveEntry> {
    paths.iter().map(|p| ArchiveEntry::file(*p)).collect()
}

fn scan(entries: &[ArchiveEntry]) -> CandidateSet {
    CandidateRanker::new().rank_all(&CandidateClassifier::new().partition(entries))
}

// ============================================================================
// Classifier Tests
// ============================================================================

#[rstest]
#[case("sf_logs.txt", Some(ArtifactKind::SfLog))]
#[case("x/y/SF_Logs.TXT", Some(ArtifactKind::SfLog))]
#[case(r"x\display\sf\sf_logs.txt", Some(ArtifactKind::SfLog))]
#[case("logs/android_log_0003.txt", Some(ArtifactKind::AndroidLog))]
#[case("logs/ANDROID_LOG_boot.Txt", Some(ArtifactKind::AndroidLog))]
#[case("rec/screen.MP4", Some(ArtifactKind::ScreenRecord))]
#[case("rec/screen.webm", Some(ArtifactKind::ScreenRecord))]
#[case("rec/screen.3gp", Some(ArtifactKind::ScreenRecord))]
#[case("sf_logs.txt.bak", None)]
#[case("android_log_1.log", None)]
#[case("screen.mp4.part", None)]
#[case("README", None)]
fn test_classify_path(#[case] path: &str, #[case] expected: Option<ArtifactKind>) {
    assert_eq!(CandidateClassifier::classify_path(path), expected);
}

#[rstest]
fn test_android_prefix_with_video_extension_is_video() {
    assert_eq!(
        CandidateClassifier::classify_path("android_log_capture.mp4"),
        Some(ArtifactKind::ScreenRecord)
    );
}

#[rstest]
fn test_partition_ignores_directories_and_blank_names() {
    let entries = vec![
        ArchiveEntry::directory("display/sf/sf_logs.txt/"),
        ArchiveEntry::file("   "),
        ArchiveEntry::file("display/sf/sf_logs.txt"),
    ];
    let classification = CandidateClassifier::new().partition(&entries);
    assert_eq!(classification.sf_logs.len(), 1);
    assert!(classification.android_logs.is_empty());
    assert!(classification.videos.is_empty());
}

#[rstest]
fn test_partition_dedups_case_insensitively() {
    let entries = files(&[
        "Display/SF/sf_logs.txt",
        "display/sf/SF_LOGS.TXT",
        r"display\sf\sf_logs.txt",
    ]);
    let classification = CandidateClassifier::new().partition(&entries);
    assert_eq!(classification.sf_logs.len(), 1);
    assert_eq!(classification.sf_logs[0].path(), "Display/SF/sf_logs.txt");
}

#[rstest]
fn test_empty_archive_yields_empty_lists() {
    let set = scan(&[]);
    assert!(set.is_empty());
    assert!(set.default_selection().is_empty());
}

// ============================================================================
// Ranker Tests
// ============================================================================

#[rstest]
#[case("a/display/sf/raw/sf_logs.txt", 1004)]
#[case("b/display/sf/sf_logs.txt", 203)]
#[case("c/sf_logs.txt", 1)]
#[case("sf_logs.txt", 0)]
#[case("DISPLAY/SF/RAW/sf_logs.txt", 1003)]
#[case("x/mydisplay/sf/raw/sf_logs.txt", 4)]
fn test_sf_score(#[case] path: &str, #[case] expected: u32) {
    assert_eq!(CandidateRanker::score(ArtifactKind::SfLog, path), expected);
}

#[rstest]
fn test_sf_depth_bonus_is_capped() {
    let deep = format!("{}sf_logs.txt", "d/".repeat(200));
    assert_eq!(CandidateRanker::score(ArtifactKind::SfLog, &deep), 80);
    let deep_video = format!("{}rec.mp4", "d/".repeat(200));
    assert_eq!(
        CandidateRanker::score(ArtifactKind::ScreenRecord, &deep_video),
        60
    );
}

#[rstest]
#[case("video/screen_record/rec.mp4", 502)]
#[case("rec.mp4", 0)]
#[case("a/b/c/rec.mkv", 3)]
fn test_video_score(#[case] path: &str, #[case] expected: u32) {
    assert_eq!(
        CandidateRanker::score(ArtifactKind::ScreenRecord, path),
        expected
    );
}

#[rstest]
fn test_android_logs_score_zero() {
    assert_eq!(
        CandidateRanker::score(ArtifactKind::AndroidLog, "a/b/c/android_log_1.txt"),
        0
    );
}

#[rstest]
fn test_raw_beats_deeper_processed() {
    let deep_processed = format!("{}display/sf/sf_logs.txt", "x/".repeat(70));
    let set = scan(&files(&[&deep_processed, "display/sf/raw/sf_logs.txt"]));
    assert_eq!(set.best_sf_log(), Some("display/sf/raw/sf_logs.txt"));
}

#[rstest]
fn test_ties_prefer_newest_then_enumeration_order() {
    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    let entries = vec![
        ArchiveEntry::file("a/android_log_1.txt"),
        ArchiveEntry::file("a/android_log_2.txt").with_modified(Some(base)),
        ArchiveEntry::file("a/android_log_3.txt"),
        ArchiveEntry::file("a/android_log_4.txt")
            .with_modified(Some(base + Duration::from_secs(60))),
    ];
    let ranked = CandidateRanker::new().rank(ArtifactKind::AndroidLog, &entries);
    let order: Vec<&str> = ranked.iter().map(|c| c.entry.path()).collect();
    assert_eq!(
        order,
        vec![
            "a/android_log_4.txt",
            "a/android_log_2.txt",
            "a/android_log_1.txt",
            "a/android_log_3.txt",
        ]
    );
}

// ============================================================================
// Candidate Set Tests
// ============================================================================

#[fixture]
fn bug123() -> CandidateSet {
    scan(&files(&[
        "a/display/sf/raw/sf_logs.txt",
        "b/display/sf/sf_logs.txt",
        "c/sf_logs.txt",
        "android_log_1.txt",
        "android_log_2.TXT",
        "video/screen_record/rec.mp4",
        "notes.md",
    ]))
}

#[rstest]
fn test_bug123_candidates(bug123: CandidateSet) {
    assert_eq!(
        bug123.sf_log_entries(),
        [
            "a/display/sf/raw/sf_logs.txt",
            "b/display/sf/sf_logs.txt",
            "c/sf_logs.txt"
        ]
    );
    assert_eq!(
        bug123.android_log_entries(),
        ["android_log_1.txt", "android_log_2.TXT"]
    );
    assert_eq!(bug123.video_entries(), ["video/screen_record/rec.mp4"]);
    assert_eq!(bug123.len(), 6);
    assert!(bug123.warning("bug123.zip").is_none());
}

#[rstest]
fn test_default_selection_takes_best_sf_only(bug123: CandidateSet) {
    assert_eq!(
        bug123.default_selection(),
        vec![
            "a/display/sf/raw/sf_logs.txt",
            "android_log_1.txt",
            "android_log_2.TXT",
            "video/screen_record/rec.mp4",
        ]
    );
    assert_eq!(bug123.all_candidates().len(), 6);
}

#[rstest]
fn test_no_sf_logs_warning() {
    let set = scan(&files(&["android_log_1.txt", "rec.mp4"]));
    let warning = set.warning("bundle.zip").unwrap();
    assert_eq!(
        warning,
        ScanWarning::NoSfLogs {
            source: PathBuf::from("bundle.zip")
        }
    );
    assert!(warning.to_string().contains("bundle.zip"));
    assert_eq!(set.android_log_entries().len(), 1);
    assert_eq!(set.video_entries().len(), 1);
}

#[rstest]
fn test_log_project_best_picks_first_of_each() {
    let candidates = LogProjectCandidates {
        root: PathBuf::from("/r"),
        sf_logs: vec![
            PathBuf::from("/r/raw/sf_logs.txt"),
            PathBuf::from("/r/sf_logs.txt"),
        ],
        screen_records: vec![],
        android_logs: vec![PathBuf::from("/r/android_log_1.txt")],
    };
    let best = candidates.best();
    assert_eq!(
        best.sf_log.as_deref(),
        Some(Path::new("/r/raw/sf_logs.txt"))
    );
    assert_eq!(best.screen_record, None);
    assert_eq!(best.android_logs.len(), 1);
    assert!(candidates.has_alternatives());
}

// ============================================================================
// Extraction Entity Tests
// ============================================================================

#[rstest]
fn test_entry_selection_matching() {
    let requested = vec![
        "Display/SF/sf_logs.txt".to_string(),
        "  ".to_string(),
        "display/sf/SF_LOGS.txt".to_string(),
        "missing.txt".to_string(),
    ];
    let selection = EntrySelection::new(&requested);
    assert_eq!(selection.len(), 2);
    assert_eq!(
        selection.matches(r"display\sf\sf_logs.txt"),
        Some("Display/SF/sf_logs.txt")
    );
    assert_eq!(selection.matches("other.txt"), None);
    assert_eq!(
        selection.missing(["display/sf/sf_logs.txt"]),
        vec!["missing.txt".to_string()]
    );
}

#[rstest]
#[case(0, 4, 0.0)]
#[case(1, 4, 0.25)]
#[case(4, 4, 1.0)]
#[case(0, 0, 1.0)]
fn test_progress_fraction(#[case] done: usize, #[case] total: usize, #[case] expected: f64) {
    let progress = ExtractionProgress::new(done, total, "x");
    assert!((progress.fraction() - expected).abs() < f64::EPSILON);
}

// ============================================================================
// Archive Format Tests
// ============================================================================

#[rstest]
#[case(b"PK\x03\x04rest", Some(ArchiveFormat::Zip))]
#[case(b"PK\x05\x06\x00\x00", Some(ArchiveFormat::Zip))]
#[case(b"PK\x07\x08\x00\x00", Some(ArchiveFormat::Zip))]
#[case(b"7z\xBC\xAF\x27\x1C\x00", Some(ArchiveFormat::SevenZip))]
#[case(b"Rar!\x1A\x07\x01\x00", Some(ArchiveFormat::Rar))]
#[case(b"PK\x01\x02", None)]
#[case(b"PK", None)]
#[case(b"hello world", None)]
fn test_detect_format(#[case] header: &[u8], #[case] expected: Option<ArchiveFormat>) {
    assert_eq!(ArchiveFormat::detect(header), expected);
}

#[rstest]
#[case("bug.ZIP", Some(ArchiveFormat::Zip))]
#[case("bug.7z", Some(ArchiveFormat::SevenZip))]
#[case("bug.rar", Some(ArchiveFormat::Rar))]
#[case("bug.tar.gz", None)]
#[case("bug", None)]
fn test_format_from_extension(#[case] path: &str, #[case] expected: Option<ArchiveFormat>) {
    assert_eq!(ArchiveFormat::from_extension(Path::new(path)), expected);
}

// ============================================================================
// Properties
// ============================================================================

fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("display".to_string()),
        Just("sf".to_string()),
        Just("raw".to_string()),
        Just("screen_record".to_string()),
        Just("Display".to_string()),
        "[a-z]{1,6}",
    ];
    let name = prop_oneof![
        Just("sf_logs.txt".to_string()),
        Just("SF_LOGS.TXT".to_string()),
        Just("android_log_1.txt".to_string()),
        Just("rec.mp4".to_string()),
        Just("rec.MKV".to_string()),
        "[a-z]{1,8}\\.(txt|log|png)",
    ];
    (prop::collection::vec(segment, 0..5), name, any::<bool>()).prop_map(
        |(dirs, name, backslash)| {
            let sep = if backslash { "\\" } else { "/" };
            let mut parts = dirs;
            parts.push(name);
            parts.join(sep)
        },
    )
}

proptest! {
    #[test]
    fn prop_scan_is_deterministic(paths in prop::collection::vec(path_strategy(), 0..40)) {
        let entries = files(&paths.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(scan(&entries), scan(&entries));
    }

    #[test]
    fn prop_candidates_are_classified_unique_and_sf_sorted(
        paths in prop::collection::vec(path_strategy(), 0..40)
    ) {
        let entries = files(&paths.iter().map(String::as_str).collect::<Vec<_>>());
        let set = scan(&entries);

        for kind in ArtifactKind::ALL {
            for path in set.entries(kind) {
                prop_assert_eq!(CandidateClassifier::classify_path(path), Some(kind));
            }
        }

        let all = set.all_candidates();
        let mut keys: Vec<String> = all.iter().map(|p| entry_key(p)).collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), set.len());

        let scores: Vec<u32> = set
            .sf_log_entries()
            .iter()
            .map(|p| CandidateRanker::score(ArtifactKind::SfLog, p))
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
