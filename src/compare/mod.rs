//! Comparison results and the engine that produces them.
//!
//! This module defines the result model ([`Change`], [`ChangeRecord`],
//! [`AnalysisProgress`]) and hosts the two algorithmic pieces:
//!
//! - [`moves`]: pairs deleted files on side A with added files on side
//!   B when they look like the same logical file relocated
//! - [`engine`]: reconciles two snapshots into a classified, sorted
//!   change list

pub mod engine;
pub mod moves;

use serde::Serialize;

use crate::diff::DiffSegment;

pub use engine::{
    compare_snapshots, compare_snapshots_cancellable, compare_snapshots_with_progress,
};
pub use moves::{detect_moves, MoveMatch};

/// What happened to one file between the two snapshots.
///
/// The variant carries exactly the paths that exist for that kind of
/// change: an added file has no A-side path, a deleted file no B-side
/// path, everything else has both. Segments are only present where a
/// content diff was computed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// File exists only in snapshot B.
    Added {
        /// Path in snapshot B.
        path_b: String,
    },
    /// File exists only in snapshot A.
    Deleted {
        /// Path in snapshot A.
        path_a: String,
    },
    /// Same path on both sides, content differs.
    Modified {
        /// Path in snapshot A.
        path_a: String,
        /// Path in snapshot B.
        path_b: String,
        /// Content diff between the two versions.
        segments: Vec<DiffSegment>,
    },
    /// Same file under a new path, content identical.
    Moved {
        /// Path in snapshot A.
        path_a: String,
        /// Path in snapshot B.
        path_b: String,
    },
    /// Same file under a new path with content edits.
    MovedModified {
        /// Path in snapshot A.
        path_a: String,
        /// Path in snapshot B.
        path_b: String,
        /// Content diff between the two versions.
        segments: Vec<DiffSegment>,
    },
}

impl Change {
    /// Short lowercase label for display and serialization.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Change::Added { .. } => "added",
            Change::Deleted { .. } => "deleted",
            Change::Modified { .. } => "modified",
            Change::Moved { .. } => "moved",
            Change::MovedModified { .. } => "moved_modified",
        }
    }

    /// Path on side A, when one exists for this kind of change.
    #[must_use]
    pub fn path_a(&self) -> Option<&str> {
        match self {
            Change::Added { .. } => None,
            Change::Deleted { path_a }
            | Change::Modified { path_a, .. }
            | Change::Moved { path_a, .. }
            | Change::MovedModified { path_a, .. } => Some(path_a),
        }
    }

    /// Path on side B, when one exists for this kind of change.
    #[must_use]
    pub fn path_b(&self) -> Option<&str> {
        match self {
            Change::Deleted { .. } => None,
            Change::Added { path_b }
            | Change::Modified { path_b, .. }
            | Change::Moved { path_b, .. }
            | Change::MovedModified { path_b, .. } => Some(path_b),
        }
    }

    /// Diff segments, empty when no content diff was computed.
    #[must_use]
    pub fn segments(&self) -> &[DiffSegment] {
        match self {
            Change::Modified { segments, .. } | Change::MovedModified { segments, .. } => segments,
            _ => &[],
        }
    }
}

/// One detected change, never one per unchanged file.
///
/// Records are created fresh on each comparison run and never mutated
/// afterwards. `magnitude` measures the size of the change in
/// characters and is used purely for ordering, never classification.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    /// The classified change, with its paths and any diff segments.
    #[serde(flatten)]
    pub change: Change,
    /// Display name (final path segment of the affected file).
    pub file_name: String,
    /// Size of the change in characters; ordering key only.
    pub magnitude: u64,
}

/// Advisory progress notification emitted during a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisProgress {
    /// Human-readable phase name.
    pub phase: String,
    /// Items processed so far within the phase.
    pub current: usize,
    /// Total items in the phase (0 when unknown).
    pub total: usize,
}

impl AnalysisProgress {
    pub(crate) fn new(phase: &str, current: usize, total: usize) -> Self {
        Self {
            phase: phase.to_string(),
            current,
            total,
        }
    }
}
