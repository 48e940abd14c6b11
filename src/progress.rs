//! Terminal progress display using indicatif.
//!
//! Bridges the engine's advisory [`AnalysisProgress`] notifications to
//! a progress bar, and provides spinners for the snapshot-loading
//! phase. Purely cosmetic: results never depend on anything here.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::compare::AnalysisProgress;

/// Renders analysis progress as a terminal progress bar.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    phase: String,
    enabled: bool,
}

impl ProgressReporter {
    /// Create a reporter. When `enabled` is false every call is a no-op,
    /// which is how quiet mode and JSON output suppress the bars.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            bar: None,
            phase: String::new(),
            enabled,
        }
    }

    /// Spinner shown while a snapshot is being loaded from disk.
    ///
    /// Returns `None` when display is disabled; the caller finishes the
    /// spinner once loading completes.
    #[must_use]
    pub fn loading_spinner(&self, message: String) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let spinner = ProgressBar::new_spinner().with_message(message);
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    /// Feed one engine progress notification into the display.
    pub fn update(&mut self, progress: &AnalysisProgress) {
        if !self.enabled {
            return;
        }
        if progress.phase == "Done" {
            self.finish();
            return;
        }
        if progress.phase != self.phase {
            self.finish();
            self.phase = progress.phase.clone();
            let bar = ProgressBar::new(progress.total.max(1) as u64);
            bar.set_style(
                ProgressStyle::with_template("{msg:<22} [{bar:30.cyan/blue}] {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            bar.set_message(progress.phase.clone());
            self.bar = Some(bar);
        }
        if let Some(bar) = &self.bar {
            bar.set_position(progress.current as u64);
        }
    }

    /// Remove the current bar from the terminal, if any.
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.phase.clear();
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}
