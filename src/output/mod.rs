//! Output formatters for comparison results.
//!
//! Two renditions of the same record list:
//! - [`text`]: colored, human-readable report for the terminal
//! - [`json`]: machine-readable output for scripting
//!
//! Both receive the records exactly as the engine ordered them (most
//! significant change first) and never reorder.

pub mod json;
pub mod text;

use std::time::Duration;

use serde::Serialize;

use crate::compare::{Change, ChangeRecord};
use crate::snapshot::Snapshot;

pub use json::JsonReport;
pub use text::TextReport;

/// Aggregate statistics for one comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Display name of snapshot A.
    pub snapshot_a: String,
    /// Display name of snapshot B.
    pub snapshot_b: String,
    /// Leaf file count on side A.
    pub files_a: usize,
    /// Leaf file count on side B.
    pub files_b: usize,
    /// Total leaf file bytes on side A.
    pub bytes_a: u64,
    /// Total leaf file bytes on side B.
    pub bytes_b: u64,
    /// Number of added files.
    pub added: usize,
    /// Number of deleted files.
    pub deleted: usize,
    /// Number of modified files.
    pub modified: usize,
    /// Number of unchanged moves.
    pub moved: usize,
    /// Number of moved-and-modified files.
    pub moved_modified: usize,
    /// Total change records.
    pub total_changes: usize,
    /// Wall-clock duration of the comparison in milliseconds.
    pub duration_ms: u64,
}

impl ReportSummary {
    /// Tally a record list against its two input snapshots.
    #[must_use]
    pub fn new(
        side_a: &Snapshot,
        side_b: &Snapshot,
        records: &[ChangeRecord],
        duration: Duration,
    ) -> Self {
        let mut summary = Self {
            snapshot_a: side_a.name.clone(),
            snapshot_b: side_b.name.clone(),
            files_a: side_a.file_count(),
            files_b: side_b.file_count(),
            bytes_a: side_a.total_size(),
            bytes_b: side_b.total_size(),
            added: 0,
            deleted: 0,
            modified: 0,
            moved: 0,
            moved_modified: 0,
            total_changes: records.len(),
            duration_ms: duration.as_millis() as u64,
        };
        for record in records {
            match record.change {
                Change::Added { .. } => summary.added += 1,
                Change::Deleted { .. } => summary.deleted += 1,
                Change::Modified { .. } => summary.modified += 1,
                Change::Moved { .. } => summary.moved += 1,
                Change::MovedModified { .. } => summary.moved_modified += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_snapshots;
    use crate::snapshot::{Blake3Hasher, FileEntry};

    #[test]
    fn test_summary_tallies_kinds() {
        let hasher = Blake3Hasher;
        let a = Snapshot::from_entries(
            "left",
            vec![
                FileEntry::file("edit.txt", "before", &hasher),
                FileEntry::file("gone.txt", "bye", &hasher),
                FileEntry::file("a/move.txt", "stay", &hasher),
            ],
        )
        .unwrap();
        let b = Snapshot::from_entries(
            "right",
            vec![
                FileEntry::file("edit.txt", "after", &hasher),
                FileEntry::file("new.txt", "hi", &hasher),
                FileEntry::file("b/move.txt", "stay", &hasher),
            ],
        )
        .unwrap();

        let records = compare_snapshots(&a, &b);
        let summary = ReportSummary::new(&a, &b, &records, Duration::from_millis(7));

        assert_eq!(summary.snapshot_a, "left");
        assert_eq!(summary.files_a, 3);
        assert_eq!(summary.files_b, 3);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.moved_modified, 0);
        assert_eq!(summary.total_changes, 4);
        assert_eq!(summary.duration_ms, 7);
    }
}
