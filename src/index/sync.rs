//! Reconcile a loaded snapshot against the live directory.
//!
//! Changes are detected by exact inequality of modification timestamps, so a
//! touched-but-unchanged file is re-indexed too. Modified files are removed in
//! full before being indexed again; postings are never patched in place.

use crate::index::snapshot::Snapshot;
use crate::index::types::{DocId, SourceFile};
use log::info;
use rustc_hash::FxHashMap;

/// Files that differ between the snapshot and the live directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Present on disk, unknown to the snapshot
    pub added: Vec<DocId>,
    /// Known to the snapshot with a different timestamp on disk
    pub modified: Vec<DocId>,
    /// Known to the snapshot, gone from disk
    pub removed: Vec<DocId>,
    /// Documents whose stray postings were dropped before diffing
    pub orphans_scrubbed: usize,
}

impl SyncReport {
    /// True when the directory matches the snapshot
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }

    /// Whether the snapshot changed and must be written back
    pub fn is_dirty(&self) -> bool {
        !self.is_empty() || self.orphans_scrubbed > 0
    }
}

/// Compute the added/modified/removed sets without touching the snapshot
pub fn diff(snapshot: &Snapshot, live: &[SourceFile]) -> SyncReport {
    let live_stamps: FxHashMap<&str, u64> = live
        .iter()
        .map(|f| (f.id.as_str(), f.last_modified))
        .collect();

    let mut report = SyncReport::default();

    let known_stamps: FxHashMap<&str, u64> = snapshot.documents().timestamps().collect();

    for (&id, &stamp) in &live_stamps {
        match known_stamps.get(id) {
            None => report.added.push(id.to_string()),
            Some(&known) if known != stamp => report.modified.push(id.to_string()),
            Some(_) => {}
        }
    }

    report.removed = known_stamps
        .keys()
        .filter(|id| !live_stamps.contains_key(*id))
        .map(|id| id.to_string())
        .collect();

    report.added.sort_unstable();
    report.modified.sort_unstable();
    report.removed.sort_unstable();
    report
}

/// Bring `snapshot` in line with `live` and report what changed
pub fn sync_snapshot(snapshot: &mut Snapshot, live: &[SourceFile]) -> SyncReport {
    let orphans_scrubbed = snapshot.scrub_orphans();

    let mut report = diff(snapshot, live);
    report.orphans_scrubbed = orphans_scrubbed;

    if report.is_empty() {
        info!("Index is up to date");
        return report;
    }

    // Removal first: a modified file must lose its stale postings before it
    // is indexed again
    for id in report.removed.iter().chain(&report.modified) {
        snapshot.remove_document(id);
    }

    let paths: FxHashMap<&str, &SourceFile> = live.iter().map(|f| (f.id.as_str(), f)).collect();
    for id in report.added.iter().chain(&report.modified) {
        if let Some(file) = paths.get(id.as_str()) {
            snapshot.index_document(id, &file.path);
        }
    }

    for id in &report.added {
        info!("Added: {}", id);
    }
    for id in &report.modified {
        info!("Modified: {}", id);
    }
    for id in &report.removed {
        info!("Removed: {}", id);
    }
    info!(
        "Sync complete: {} added, {} modified, {} removed",
        report.added.len(),
        report.modified.len(),
        report.removed.len()
    );

    report
}
