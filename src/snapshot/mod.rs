//! Snapshot model: one side's flat listing of file entries.
//!
//! A [`Snapshot`] is what the comparison engine consumes. It can be
//! built from a real directory via [`walker::load_snapshot`] or
//! assembled in memory (tests, other frontends). Construction validates
//! the preconditions the engine relies on, most importantly that paths
//! are unique within one listing.

pub mod filters;
pub mod hasher;
pub mod walker;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

pub use filters::SnapshotFilter;
pub use hasher::{Blake3Hasher, ContentHasher};
pub use walker::load_snapshot;

/// A single file or directory in a snapshot.
///
/// `path` is the stable identity within one snapshot and always uses
/// `/` separators; `name` is its final segment. Directory entries carry
/// empty content and fingerprint and never participate in comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Path relative to the snapshot root, `/`-separated.
    pub path: String,
    /// Final path segment.
    pub name: String,
    /// Full text content (empty for directories).
    pub content: String,
    /// Content fingerprint from the [`ContentHasher`] (empty for directories).
    pub fingerprint: String,
    /// Size in bytes.
    pub size: u64,
    /// Whether this entry is a directory.
    pub is_directory: bool,
}

impl FileEntry {
    /// Create a leaf file entry, fingerprinting its content.
    #[must_use]
    pub fn file(path: impl Into<String>, content: impl Into<String>, hasher: &dyn ContentHasher) -> Self {
        let path = path.into();
        let content = content.into();
        let size = content.len() as u64;
        Self {
            name: final_segment(&path),
            fingerprint: hasher.fingerprint(&content),
            path,
            content,
            size,
            is_directory: false,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn directory(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: final_segment(&path),
            path,
            content: String::new(),
            fingerprint: String::new(),
            size: 0,
            is_directory: true,
        }
    }
}

/// Final `/`-separated segment of a path.
fn final_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Errors raised while constructing or loading a snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    /// The same path appeared twice within one listing.
    #[error("Duplicate path in snapshot: {0}")]
    DuplicatePath(String),

    /// The snapshot root was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The snapshot root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while reading a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A named, validated listing of file entries.
///
/// Entry order is preserved exactly as supplied; the engine's
/// deterministic tie-breaks (notably move detection) depend on it.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Display name for the snapshot (e.g., the root directory name).
    pub name: String,
    entries: Vec<FileEntry>,
}

impl Snapshot {
    /// Build a snapshot from a listing, rejecting duplicate paths.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::DuplicatePath`] if any path occurs more
    /// than once.
    pub fn from_entries(
        name: impl Into<String>,
        entries: Vec<FileEntry>,
    ) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.path.as_str()) {
                return Err(SnapshotError::DuplicatePath(entry.path.clone()));
            }
        }
        Ok(Self {
            name: name.into(),
            entries,
        })
    }

    /// All entries, directories included, in input order.
    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Leaf file entries in input order.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|e| !e.is_directory)
    }

    /// Number of leaf files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Total size of leaf files in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files().map(|f| f.size).sum()
    }
}
