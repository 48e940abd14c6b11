//! Human-readable text report for the terminal.
//!
//! One line per change record in engine order (most significant
//! first), an aggregate footer, and optionally the content diff of
//! every modified file in `+`/`-` form. Colors go through `yansi`;
//! `--no-color` disables them globally.

use std::fmt::Write as _;
use std::io::Write;

use bytesize::ByteSize;
use yansi::Paint;

use crate::compare::{Change, ChangeRecord};
use crate::diff::{DiffSegment, SegmentKind};

use super::ReportSummary;

/// Text formatter for a comparison run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport {
    /// Also print content diffs for modified files.
    pub show_diffs: bool,
}

impl TextReport {
    /// Create a formatter.
    #[must_use]
    pub fn new(show_diffs: bool) -> Self {
        Self { show_diffs }
    }

    /// Render the full report to a string.
    #[must_use]
    pub fn render(&self, records: &[ChangeRecord], summary: &ReportSummary) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Comparing '{}' ({} files, {}) against '{}' ({} files, {})",
            summary.snapshot_a.bold(),
            summary.files_a,
            ByteSize(summary.bytes_a),
            summary.snapshot_b.bold(),
            summary.files_b,
            ByteSize(summary.bytes_b),
        );
        out.push('\n');

        if records.is_empty() {
            let _ = writeln!(out, "{}", "No differences found.".green());
            return out;
        }

        for record in records {
            self.render_record(&mut out, record);
        }

        out.push('\n');
        let _ = writeln!(
            out,
            "{} changed: {} modified, {} moved, {} moved+modified, {} deleted, {} added ({} ms)",
            format!(
                "{} file{}",
                summary.total_changes,
                if summary.total_changes == 1 { "" } else { "s" }
            )
            .bold(),
            summary.modified,
            summary.moved + summary.moved_modified,
            summary.moved_modified,
            summary.deleted,
            summary.added,
            summary.duration_ms,
        );
        out
    }

    /// Render the report to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        records: &[ChangeRecord],
        summary: &ReportSummary,
    ) -> anyhow::Result<()> {
        writer.write_all(self.render(records, summary).as_bytes())?;
        Ok(())
    }

    fn render_record(&self, out: &mut String, record: &ChangeRecord) {
        let label = format!("{:<14}", record.change.label());
        let label = match record.change {
            Change::Added { .. } => label.green().to_string(),
            Change::Deleted { .. } => label.red().to_string(),
            Change::Modified { .. } => label.yellow().to_string(),
            Change::Moved { .. } => label.cyan().to_string(),
            Change::MovedModified { .. } => label.magenta().to_string(),
        };

        let location = match (record.change.path_a(), record.change.path_b()) {
            (Some(a), Some(b)) if a != b => format!("{a} -> {b}"),
            (Some(a), _) => a.to_string(),
            (_, Some(b)) => b.to_string(),
            (None, None) => unreachable!("every change carries at least one path"),
        };

        if record.magnitude > 0 {
            let _ = writeln!(out, "{label} {location} ({})", record.magnitude);
        } else {
            let _ = writeln!(out, "{label} {location}");
        }

        if self.show_diffs && !record.change.segments().is_empty() {
            render_segments(out, record.change.segments());
            out.push('\n');
        }
    }
}

/// Print segments with one prefixed line per line of text.
fn render_segments(out: &mut String, segments: &[DiffSegment]) {
    for segment in segments {
        let (prefix, paint): (&str, fn(&str) -> String) = match segment.kind {
            SegmentKind::Equal => (" ", |s| s.dim().to_string()),
            SegmentKind::Add => ("+", |s| s.green().to_string()),
            SegmentKind::Remove => ("-", |s| s.red().to_string()),
        };
        for line in segment.text.split('\n') {
            let _ = writeln!(out, "    {}", paint(&format!("{prefix} {line}")));
        }
    }
}
