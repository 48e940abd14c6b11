//! Background execution harness for the comparison engine.
//!
//! The engine itself is a pure, synchronous computation; this module
//! runs it off the caller's thread and talks back over a channel with a
//! strict three-message protocol: zero or more [`AnalysisEvent::Progress`]
//! notifications followed by exactly one terminal event, either
//! [`AnalysisEvent::Result`] or [`AnalysisEvent::Error`]. A panic inside
//! the run surfaces as `Error`, never as a missing terminal event.
//!
//! # Single-flight
//!
//! Starting a new analysis supersedes any outstanding one. Rust threads
//! cannot be killed, so cancellation is cooperative: the superseded
//! run's flag is raised and the engine stops at its next checkpoint,
//! delivering no further events, terminal or otherwise. Callers only
//! ever observe events from the most recent request. Dropping the
//! worker cancels the outstanding run the same way.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::compare::{compare_snapshots_cancellable, AnalysisProgress, ChangeRecord};
use crate::snapshot::Snapshot;

/// A message from a running analysis.
#[derive(Debug)]
pub enum AnalysisEvent {
    /// Advisory progress notification.
    Progress(AnalysisProgress),
    /// Terminal: the comparison finished. Zero records means the
    /// snapshots are identical, which is success, not an error.
    Result(Vec<ChangeRecord>),
    /// Terminal: the run failed; carries a human-readable description.
    Error(String),
}

/// Runs comparisons on a background thread, one at a time.
#[derive(Debug, Default)]
pub struct AnalysisWorker {
    cancel: Option<Arc<AtomicBool>>,
}

impl AnalysisWorker {
    /// Create an idle worker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start comparing two snapshots in the background.
    ///
    /// Any outstanding run is cancelled first. The snapshots are shared
    /// with the worker thread, never copied. The returned receiver
    /// yields progress events and then exactly one terminal event.
    pub fn analyze(
        &mut self,
        side_a: Arc<Snapshot>,
        side_b: Arc<Snapshot>,
    ) -> Receiver<AnalysisEvent> {
        self.cancel_current();

        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let flag = Arc::clone(&cancel);

        thread::spawn(move || run_analysis(&side_a, &side_b, &tx, &flag));

        self.cancel = Some(cancel);
        rx
    }

    /// Cancel the outstanding run, if any.
    ///
    /// The superseded run stops at its next checkpoint and delivers no
    /// further events, terminal or otherwise.
    pub fn cancel_current(&mut self) {
        if let Some(flag) = self.cancel.take() {
            log::debug!("cancelling outstanding analysis run");
            flag.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for AnalysisWorker {
    fn drop(&mut self) {
        self.cancel_current();
    }
}

fn run_analysis(
    side_a: &Snapshot,
    side_b: &Snapshot,
    tx: &Sender<AnalysisEvent>,
    cancel: &AtomicBool,
) {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        compare_snapshots_cancellable(
            side_a,
            side_b,
            |progress| {
                let _ = tx.send(AnalysisEvent::Progress(progress));
            },
            || cancel.load(Ordering::SeqCst),
        )
    }));

    let event = match outcome {
        // Superseded mid-run: the engine stopped at a checkpoint.
        Ok(None) => return,
        Ok(Some(records)) => AnalysisEvent::Result(records),
        Err(payload) => AnalysisEvent::Error(panic_message(payload.as_ref())),
    };
    // A cancellation landing after the run finished still wins.
    if cancel.load(Ordering::SeqCst) {
        return;
    }
    // The receiver may already be gone; nothing useful to do then.
    let _ = tx.send(event);
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "analysis failed unexpectedly".to_string()
    }
}
