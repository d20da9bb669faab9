//! The run engine: one full diff-and-reconcile pass.
//!
//! A run is strictly sequential: connect, retrieve, count, read the stored
//! directory, diff, report, write. Only one run may target a store at a
//! time; nothing here locks against a concurrent one.
//!
//! Every narrative line is emitted as an `info` event the moment it is
//! produced and also collected into [`RunSummary::narrative`]. Errors are
//! emitted as `error` events before they are returned.

use dh_diff::{
    bootstrap_line, connecting_line, diff_directories, render_changes, stored_count_line,
    ChangeSet, DIRECTORY_UPDATED, RUN_FOOTER, RUN_HEADER,
};
use dh_store::DirectoryStore;
use dh_types::Directory;
use tracing::{error, info};

use crate::error::EngineError;
use crate::reconcile::{apply, plan, ReconcileReport};
use crate::source::SnapshotSource;

/// Whether a run writes to the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Reconcile the store with the new directory.
    #[default]
    Apply,
    /// Read and report only.
    DryRun,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Narrative lines, in emission order.
    pub narrative: Vec<String>,
    /// Programs stored before the run.
    pub stored_programs: usize,
    /// The store was empty and was seeded with the whole new directory.
    pub bootstrapped: bool,
    /// Classified differences between the stored and the new directory.
    pub changes: ChangeSet,
    /// Store mutations issued (all zero for a dry run).
    pub reconciled: ReconcileReport,
}

/// Sequences a run against one store.
#[derive(Debug)]
pub struct Engine<S> {
    store: S,
}

impl<S: DirectoryStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one pass against the directory supplied by `source`.
    ///
    /// An unreachable store ends the run before the source is consulted.
    /// A failed store write ends it with the store partially reconciled.
    pub fn run(
        &self,
        source: &dyn SnapshotSource,
        mode: RunMode,
    ) -> Result<RunSummary, EngineError> {
        let mut summary = RunSummary::default();
        self.run_into(source, mode, &mut summary)?;
        Ok(summary)
    }

    /// Like [`run`](Self::run), but records into `summary` so the narrative
    /// up to a failure stays available to the caller.
    pub fn run_into(
        &self,
        source: &dyn SnapshotSource,
        mode: RunMode,
        summary: &mut RunSummary,
    ) -> Result<(), EngineError> {
        let location = self.store.location();

        summary.emit(RUN_HEADER);
        summary.emit(connecting_line(&location));
        self.store.ping().map_err(fail)?;

        let new = source.fetch_directory().map_err(fail)?;

        summary.stored_programs = self.store.count().map_err(fail)?;
        summary.emit(stored_count_line(summary.stored_programs));

        if summary.stored_programs == 0 {
            summary.emit(bootstrap_line(&location));
            summary.bootstrapped = true;
            summary.changes = diff_directories(&Directory::new(), &new);
            if mode == RunMode::Apply {
                summary.reconciled.inserted = self.store.insert_all(&new).map_err(fail)?;
            }
        } else {
            let old = self.store.fetch_all().map_err(fail)?;
            summary.changes = diff_directories(&old, &new);
            for line in render_changes(&summary.changes) {
                summary.emit(line);
            }
            if mode == RunMode::Apply {
                let mutations = plan(&summary.changes);
                summary.reconciled = apply(&self.store, &mutations).map_err(fail)?;
            }
            summary.emit(DIRECTORY_UPDATED);
        }

        summary.emit(RUN_FOOTER);
        Ok(())
    }
}

impl RunSummary {
    fn emit(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{line}");
        self.narrative.push(line);
    }
}

fn fail(err: impl Into<EngineError>) -> EngineError {
    let err = err.into();
    error!("{err}");
    err
}
