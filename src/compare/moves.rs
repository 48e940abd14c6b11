//! Heuristic move detection over the two leftover file sets.
//!
//! Given the files present only in snapshot A and only in snapshot B,
//! this pairs entries that look like the same logical file relocated.
//! Matching requires an exact name match; there is no fuzzy similarity
//! threshold. Two passes, the first taking priority:
//!
//! 1. same name, same fingerprint, different path — an unchanged move
//! 2. same name, different fingerprint, different path — moved and
//!    modified
//!
//! B-side candidates are indexed by name up front, so each pass costs
//! time proportional to name collisions rather than the full cross
//! product. When several candidates share a name, the first unmatched
//! one in B-side input order wins; that order flows from snapshot
//! construction and is a documented, deterministic tie-break.

use std::collections::HashMap;

use crate::snapshot::FileEntry;

/// A matched pair of relocated files.
#[derive(Debug, Clone, Copy)]
pub struct MoveMatch<'a> {
    /// The entry as it appeared in snapshot A.
    pub file_a: &'a FileEntry,
    /// The entry as it appears in snapshot B.
    pub file_b: &'a FileEntry,
    /// False when the fingerprints matched (pure move), true when the
    /// content changed along the way.
    pub content_changed: bool,
}

/// Pair up moved files between the two leftover sets.
///
/// Every entry appears in at most one returned pair; matches are
/// greedy and never reassigned. Pass-1 (content-identical) pairs
/// precede pass-2 pairs in the output. Entries with no same-name
/// counterpart are left unmatched for the caller to classify as plain
/// adds or deletes.
#[must_use]
pub fn detect_moves<'a>(
    only_in_a: &[&'a FileEntry],
    only_in_b: &[&'a FileEntry],
) -> Vec<MoveMatch<'a>> {
    // Index B by name, preserving input order within each bucket.
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, file_b) in only_in_b.iter().enumerate() {
        by_name.entry(file_b.name.as_str()).or_default().push(idx);
    }

    let mut matched_a = vec![false; only_in_a.len()];
    let mut matched_b = vec![false; only_in_b.len()];
    let mut moves = Vec::new();

    // Pass 1: unchanged moves (fingerprints equal).
    for (ai, &file_a) in only_in_a.iter().enumerate() {
        let Some(candidates) = by_name.get(file_a.name.as_str()) else {
            continue;
        };
        for &bi in candidates {
            if matched_b[bi] {
                continue;
            }
            let file_b = only_in_b[bi];
            if file_a.fingerprint == file_b.fingerprint && file_a.path != file_b.path {
                moves.push(MoveMatch {
                    file_a,
                    file_b,
                    content_changed: false,
                });
                matched_a[ai] = true;
                matched_b[bi] = true;
                break;
            }
        }
    }

    // Pass 2: moved-and-modified (same name, different fingerprint).
    for (ai, &file_a) in only_in_a.iter().enumerate() {
        if matched_a[ai] {
            continue;
        }
        let Some(candidates) = by_name.get(file_a.name.as_str()) else {
            continue;
        };
        for &bi in candidates {
            if matched_b[bi] {
                continue;
            }
            let file_b = only_in_b[bi];
            if file_a.fingerprint != file_b.fingerprint && file_a.path != file_b.path {
                moves.push(MoveMatch {
                    file_a,
                    file_b,
                    content_changed: true,
                });
                matched_a[ai] = true;
                matched_b[bi] = true;
                break;
            }
        }
    }

    log::debug!(
        "move detection: {} pairs from {}x{} leftover files",
        moves.len(),
        only_in_a.len(),
        only_in_b.len()
    );
    moves
}
