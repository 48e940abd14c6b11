//! The comparator: reconciles two snapshots into a change list.
//!
//! # Pipeline
//!
//! 1. Index leaf files by path on both sides.
//! 2. Same-path files are diffed when their content differs and become
//!    `Modified` records; unchanged files produce nothing.
//! 3. Path leftovers go through move detection; pairs become `Moved`
//!    (no diff computed, identical content needs none) or
//!    `MovedModified` records.
//! 4. Unclaimed leftovers become `Deleted` / `Added` records.
//! 5. The list is stable-sorted by magnitude, descending.
//!
//! The whole computation is pure and single-threaded over two immutable
//! snapshots; it performs no I/O. Progress callbacks are advisory and
//! never affect the result.

use std::collections::{HashMap, HashSet};

use crate::diff::{diff_lines, has_changed, DiffSegment};
use crate::snapshot::{FileEntry, Snapshot};

use super::moves::detect_moves;
use super::{AnalysisProgress, Change, ChangeRecord};

/// Same-path comparisons between progress notifications.
const PROGRESS_INTERVAL: usize = 50;

/// Compare two snapshots without progress reporting.
#[must_use]
pub fn compare_snapshots(side_a: &Snapshot, side_b: &Snapshot) -> Vec<ChangeRecord> {
    compare_snapshots_with_progress(side_a, side_b, |_| {})
}

/// Compare two snapshots, emitting progress along the way.
///
/// Returns one record per changed file, sorted by descending magnitude.
/// Ties keep emission order: modified records first, then moves, then
/// deletions, then additions — a documented contract, not an accident
/// of the sort. The callback receives phase-boundary notifications plus
/// a periodic tick during the same-path scan, ending with one terminal
/// "Done".
pub fn compare_snapshots_with_progress(
    side_a: &Snapshot,
    side_b: &Snapshot,
    on_progress: impl FnMut(AnalysisProgress),
) -> Vec<ChangeRecord> {
    compare_snapshots_cancellable(side_a, side_b, on_progress, || false).unwrap_or_default()
}

/// Compare two snapshots with a cooperative cancellation check.
///
/// `should_cancel` is polled between files, at phase boundaries, and
/// between move pairs. Once it returns true the computation stops at
/// that checkpoint and `None` comes back; no further progress is
/// emitted and partial results are never exposed. The other entry
/// points are wrappers over this one with a check that never fires.
pub fn compare_snapshots_cancellable(
    side_a: &Snapshot,
    side_b: &Snapshot,
    mut on_progress: impl FnMut(AnalysisProgress),
    should_cancel: impl Fn() -> bool,
) -> Option<Vec<ChangeRecord>> {
    let files_a: Vec<&FileEntry> = side_a.files().collect();
    let files_b: Vec<&FileEntry> = side_b.files().collect();

    let map_b: HashMap<&str, &FileEntry> =
        files_b.iter().map(|f| (f.path.as_str(), *f)).collect();
    let paths_a: HashSet<&str> = files_a.iter().map(|f| f.path.as_str()).collect();

    let total = files_a.len() + files_b.len();
    on_progress(AnalysisProgress::new("Detecting changes", 0, total));

    let mut results: Vec<ChangeRecord> = Vec::new();
    let mut only_in_a: Vec<&FileEntry> = Vec::new();
    let mut processed = 0;

    for &file_a in &files_a {
        if should_cancel() {
            return None;
        }
        match map_b.get(file_a.path.as_str()) {
            Some(file_b) => {
                if has_changed(&file_a.content, &file_b.content) {
                    let segments = diff_lines(&file_a.content, &file_b.content);
                    let magnitude = edit_magnitude(&segments);
                    results.push(ChangeRecord {
                        change: Change::Modified {
                            path_a: file_a.path.clone(),
                            path_b: file_b.path.clone(),
                            segments,
                        },
                        file_name: file_a.name.clone(),
                        magnitude,
                    });
                }
            }
            None => only_in_a.push(file_a),
        }
        processed += 1;
        if processed % PROGRESS_INTERVAL == 0 {
            on_progress(AnalysisProgress::new("Comparing files", processed, total));
        }
    }

    let only_in_b: Vec<&FileEntry> = files_b
        .iter()
        .filter(|f| !paths_a.contains(f.path.as_str()))
        .copied()
        .collect();

    if should_cancel() {
        return None;
    }

    on_progress(AnalysisProgress::new(
        "Detecting moved files",
        0,
        only_in_a.len(),
    ));

    let moves = detect_moves(&only_in_a, &only_in_b);
    let moved_paths_a: HashSet<&str> = moves.iter().map(|m| m.file_a.path.as_str()).collect();
    let moved_paths_b: HashSet<&str> = moves.iter().map(|m| m.file_b.path.as_str()).collect();

    for pair in &moves {
        if should_cancel() {
            return None;
        }
        if pair.content_changed {
            let segments = diff_lines(&pair.file_a.content, &pair.file_b.content);
            let magnitude = edit_magnitude(&segments);
            results.push(ChangeRecord {
                change: Change::MovedModified {
                    path_a: pair.file_a.path.clone(),
                    path_b: pair.file_b.path.clone(),
                    segments,
                },
                file_name: pair.file_a.name.clone(),
                magnitude,
            });
        } else {
            // Identical content needs no diff.
            results.push(ChangeRecord {
                change: Change::Moved {
                    path_a: pair.file_a.path.clone(),
                    path_b: pair.file_b.path.clone(),
                },
                file_name: pair.file_a.name.clone(),
                magnitude: 0,
            });
        }
    }

    for &file in &only_in_a {
        if !moved_paths_a.contains(file.path.as_str()) {
            results.push(ChangeRecord {
                change: Change::Deleted {
                    path_a: file.path.clone(),
                },
                file_name: file.name.clone(),
                magnitude: file.content.chars().count() as u64,
            });
        }
    }

    for &file in &only_in_b {
        if !moved_paths_b.contains(file.path.as_str()) {
            results.push(ChangeRecord {
                change: Change::Added {
                    path_b: file.path.clone(),
                },
                file_name: file.name.clone(),
                magnitude: file.content.chars().count() as u64,
            });
        }
    }

    if should_cancel() {
        return None;
    }

    // Stable: equal magnitudes keep emission order.
    results.sort_by(|x, y| y.magnitude.cmp(&x.magnitude));

    on_progress(AnalysisProgress::new("Done", 1, 1));

    log::info!(
        "comparison finished: {} changed files ({} vs {} inputs)",
        results.len(),
        files_a.len(),
        files_b.len()
    );
    Some(results)
}

/// Total character length of all non-equal segments.
fn edit_magnitude(segments: &[DiffSegment]) -> u64 {
    segments
        .iter()
        .filter(|s| s.is_edit())
        .map(|s| s.char_len() as u64)
        .sum()
}
