//! treediff - File-Tree Snapshot Comparison
//!
//! Compares two snapshots of a file tree and produces a classified list
//! of differences: additions, deletions, content modifications, moves,
//! and move+modify combinations, with a content diff for every modified
//! file. The engine (`compare` + `diff`) is a pure computation over two
//! immutable [`snapshot::Snapshot`]s; ingestion, hashing, progress and
//! rendering live around it.

pub mod cli;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod snapshot;
pub mod worker;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::compare::ChangeRecord;
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::{JsonReport, ReportSummary, TextReport};
use crate::progress::ProgressReporter;
use crate::snapshot::{load_snapshot, Blake3Hasher, Snapshot, SnapshotFilter};
use crate::worker::{AnalysisEvent, AnalysisWorker};

/// Run a full comparison from parsed CLI arguments.
///
/// Loads both snapshots, runs the engine on a background thread while
/// forwarding progress to the terminal, renders the report, and maps
/// the outcome to an exit code.
///
/// # Errors
///
/// Fails when a snapshot cannot be loaded, a pattern does not compile,
/// or the analysis run reports an error.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let config = Config::load();
    let mut patterns = config.exclude.clone();
    patterns.extend(cli.ignore_patterns.iter().cloned());
    let filter = SnapshotFilter::new(&patterns, cli.skip_hidden || config.skip_hidden)
        .context("invalid exclusion pattern")?;

    let show_progress =
        !cli.quiet && !cli.no_progress && cli.output == OutputFormat::Text;
    let mut reporter = ProgressReporter::new(show_progress);

    let hasher = Blake3Hasher;
    let side_a = Arc::new(load_side(&cli, &filter, &hasher, &reporter, true)?);
    let side_b = Arc::new(load_side(&cli, &filter, &hasher, &reporter, false)?);

    let started = Instant::now();
    let records = run_analysis(Arc::clone(&side_a), Arc::clone(&side_b), &mut reporter)?;
    let summary = ReportSummary::new(&side_a, &side_b, &records, started.elapsed());
    reporter.finish();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Text => {
            TextReport::new(cli.diffs).write_to(&mut out, &records, &summary)?;
        }
        OutputFormat::Json => {
            JsonReport::new(&records, &summary).write_to(&mut out)?;
        }
    }

    Ok(if records.is_empty() {
        ExitCode::Identical
    } else {
        ExitCode::ChangesFound
    })
}

fn load_side(
    cli: &Cli,
    filter: &SnapshotFilter,
    hasher: &Blake3Hasher,
    reporter: &ProgressReporter,
    is_a: bool,
) -> Result<Snapshot> {
    let root = if is_a { &cli.dir_a } else { &cli.dir_b };
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let spinner = reporter.loading_spinner(format!("Loading '{name}'"));
    let snapshot = load_snapshot(root, name, filter, hasher)
        .with_context(|| format!("failed to load snapshot from {}", root.display()))?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    Ok(snapshot)
}

/// Drive one analysis run through the worker harness.
///
/// The snapshots are shared with the worker thread, never copied.
fn run_analysis(
    side_a: Arc<Snapshot>,
    side_b: Arc<Snapshot>,
    reporter: &mut ProgressReporter,
) -> Result<Vec<ChangeRecord>> {
    let mut worker = AnalysisWorker::new();
    let rx = worker.analyze(side_a, side_b);

    for event in rx {
        match event {
            AnalysisEvent::Progress(progress) => reporter.update(&progress),
            AnalysisEvent::Result(records) => return Ok(records),
            AnalysisEvent::Error(message) => {
                return Err(anyhow!(message).context("analysis failed"))
            }
        }
    }
    Err(anyhow!("analysis ended without a terminal event"))
}
