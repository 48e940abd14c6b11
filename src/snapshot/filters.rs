//! Exclusion policy applied during snapshot construction.
//!
//! Filtering happens upstream of the comparison engine: excluded
//! entries never make it into a snapshot, so the engine has no
//! exclusion logic of its own. Two layers:
//!
//! - a fixed set of directory/file names that never carry signal
//!   (dependency caches, VCS metadata, build output, OS litter)
//! - optional user-supplied gitignore-style patterns, compiled with the
//!   `ignore` crate

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Path segments that are always excluded.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "target",
    ".bin",
    ".venv",
    ".DS_Store",
    "Thumbs.db",
];

/// Decides which relative paths are kept out of a snapshot.
#[derive(Debug)]
pub struct SnapshotFilter {
    skip_hidden: bool,
    user_patterns: Option<Gitignore>,
}

impl Default for SnapshotFilter {
    fn default() -> Self {
        Self::new(&[], false).expect("empty pattern set always compiles")
    }
}

impl SnapshotFilter {
    /// Build a filter from gitignore-style patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new(patterns: &[String], skip_hidden: bool) -> Result<Self, ignore::Error> {
        let user_patterns = if patterns.is_empty() {
            None
        } else {
            let mut builder = GitignoreBuilder::new("");
            for pattern in patterns {
                builder.add_line(None, pattern)?;
            }
            Some(builder.build()?)
        };
        Ok(Self {
            skip_hidden,
            user_patterns,
        })
    }

    /// Check whether a `/`-separated relative path should be excluded.
    ///
    /// Traversal prunes excluded directories whole, so this only needs
    /// to judge the path itself, not its ancestors.
    #[must_use]
    pub fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        let mut segments = rel_path.split('/');
        if segments.any(|seg| DEFAULT_EXCLUSIONS.contains(&seg)) {
            log::trace!("excluded by default list: {rel_path}");
            return true;
        }
        if self.skip_hidden
            && rel_path
                .rsplit('/')
                .next()
                .is_some_and(|name| name.starts_with('.'))
        {
            log::trace!("excluded hidden entry: {rel_path}");
            return true;
        }
        if let Some(patterns) = &self.user_patterns {
            if patterns.matched(rel_path, is_dir).is_ignore() {
                log::trace!("excluded by user pattern: {rel_path}");
                return true;
            }
        }
        false
    }
}
