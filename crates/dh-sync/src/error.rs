//! Error types for retrieval, reconciliation, and runs.

use std::path::PathBuf;

use dh_store::StoreError;
use dh_types::TypeError;
use thiserror::Error;

/// The new directory could not be obtained.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse snapshot: {0}")]
    Parse(String),

    #[error("invalid snapshot: {0}")]
    Invalid(#[from] TypeError),
}

/// A store mutation failed; the mutations after it were not attempted.
#[derive(Debug, Error)]
#[error("{mutation} failed after {applied} applied mutation(s): {source}")]
pub struct ReconcileError {
    /// Mutations applied before the failure.
    pub applied: usize,
    /// Description of the failed mutation.
    pub mutation: String,
    #[source]
    pub source: StoreError,
}

/// A run was aborted.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}
