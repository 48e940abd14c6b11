//! JSON output formatter for comparison results.
//!
//! Machine-readable output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "changes": [
//!     {
//!       "kind": "modified",
//!       "path_a": "src/main.rs",
//!       "path_b": "src/main.rs",
//!       "segments": [{"kind": "equal", "text": "..."}],
//!       "file_name": "main.rs",
//!       "magnitude": 42
//!     }
//!   ],
//!   "summary": {
//!     "snapshot_a": "before",
//!     "snapshot_b": "after",
//!     "files_a": 120,
//!     "files_b": 121,
//!     "added": 1,
//!     "deleted": 0,
//!     "modified": 3,
//!     "moved": 1,
//!     "moved_modified": 0,
//!     "total_changes": 5,
//!     "duration_ms": 12
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::compare::ChangeRecord;

use super::ReportSummary;

/// Serializable view over one comparison run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Change records, most significant first.
    pub changes: &'a [ChangeRecord],
    /// Aggregate statistics.
    pub summary: &'a ReportSummary,
}

impl<'a> JsonReport<'a> {
    /// Create a report over records and their summary.
    #[must_use]
    pub fn new(changes: &'a [ChangeRecord], summary: &'a ReportSummary) -> Self {
        Self { changes, summary }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or I/O failure.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let json = self.to_json_pretty()?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}
