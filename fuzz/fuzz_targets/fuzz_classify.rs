#![no_main]

use libfuzzer_sys::fuzz_target;
use sflens::domain::entities::{entry_key, ArchiveEntry, ArchiveFormat};
use sflens::domain::services::{CandidateClassifier, CandidateRanker};

fuzz_target!(|data: &[u8]| {
    let _ = ArchiveFormat::detect(data);

    let text = String::from_utf8_lossy(data);
    let entries: Vec<ArchiveEntry> = text.split('\n').map(ArchiveEntry::file).collect();

    for entry in &entries {
        if let Some(kind) = CandidateClassifier::classify_path(entry.path()) {
            let _ = CandidateRanker::score(kind, entry.path());
        }
        let _ = entry_key(entry.path());
    }

    let classification = CandidateClassifier::new().partition(&entries);
    let set = CandidateRanker::new().rank_all(&classification);
    assert!(set.len() <= entries.len());
});
