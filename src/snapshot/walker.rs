//! Directory ingestion: walk a tree on disk into a [`Snapshot`].
//!
//! Traversal is sorted by file name so that two loads of the same tree
//! produce identical entry order; the comparison engine's move-detector
//! tie-break is defined in terms of that order. Excluded directories
//! are pruned whole (their contents are never read). Non-UTF-8 file
//! content is decoded lossily; the engine diffs it as text.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::filters::SnapshotFilter;
use super::hasher::ContentHasher;
use super::{FileEntry, Snapshot, SnapshotError};

/// Load a snapshot from a directory on disk.
///
/// # Errors
///
/// Fails when `root` is missing or not a directory, or when a file
/// inside it cannot be read. The error carries the offending path.
pub fn load_snapshot(
    root: &Path,
    name: impl Into<String>,
    filter: &SnapshotFilter,
    hasher: &dyn ContentHasher,
) -> Result<Snapshot, SnapshotError> {
    let meta = fs::metadata(root).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => SnapshotError::NotFound(root.to_path_buf()),
        _ => SnapshotError::Io {
            path: root.to_path_buf(),
            source,
        },
    })?;
    if !meta.is_dir() {
        return Err(SnapshotError::NotADirectory(root.to_path_buf()));
    }

    let mut entries = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(item) = walker.next() {
        let entry = item.map_err(walk_error)?;
        if entry.depth() == 0 {
            continue;
        }

        let rel = relative_path(root, entry.path());
        let is_dir = entry.file_type().is_dir();

        if filter.is_excluded(&rel, is_dir) {
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        if is_dir {
            entries.push(FileEntry::directory(rel));
        } else if entry.file_type().is_file() {
            let bytes = fs::read(entry.path()).map_err(|source| SnapshotError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            let mut file = FileEntry::file(rel, content, hasher);
            // On-disk size; lossy decoding may change the string length.
            file.size = bytes.len() as u64;
            entries.push(file);
        }
        // Symlinks and special files are skipped.
    }

    let snapshot = Snapshot::from_entries(name, entries)?;
    log::debug!(
        "loaded snapshot '{}': {} files, {} bytes",
        snapshot.name,
        snapshot.file_count(),
        snapshot.total_size()
    );
    Ok(snapshot)
}

/// Path of `child` relative to `root`, `/`-separated on every platform.
fn relative_path(root: &Path, child: &Path) -> String {
    child
        .strip_prefix(root)
        .unwrap_or(child)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn walk_error(err: walkdir::Error) -> SnapshotError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    match err.into_io_error() {
        Some(source) => SnapshotError::Io { path, source },
        None => SnapshotError::Io {
            path,
            source: std::io::Error::other("filesystem loop detected"),
        },
    }
}
