//! Reconciliation: bring the store in line with the new directory.
//!
//! [`plan`] turns a change set into store mutations without touching the
//! store; [`apply`] issues them one at a time. Application is fail-fast:
//! the first store error stops the pass and is returned together with the
//! number of mutations that did land. Logging the failure is left to the
//! caller. The store is then stale but valid,
//! and the next run diffs against it and finishes the job.

use std::fmt;

use dh_diff::{ChangeSet, Classification};
use dh_store::DirectoryStore;
use dh_types::Asset;
use tracing::{debug, warn};

use crate::error::ReconcileError;

/// One store call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Store a program that is not yet present.
    Insert { name: String, assets: Vec<Asset> },
    /// Replace the whole asset list of a stored program.
    Update { name: String, assets: Vec<Asset> },
    /// Remove a program.
    Delete { name: String },
}

impl Mutation {
    /// The program this mutation targets.
    pub fn program(&self) -> &str {
        match self {
            Self::Insert { name, .. } | Self::Update { name, .. } | Self::Delete { name } => name,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { name, .. } => write!(f, "insert \"{name}\""),
            Self::Update { name, .. } => write!(f, "update \"{name}\""),
            Self::Delete { name } => write!(f, "delete \"{name}\""),
        }
    }
}

/// Counts of applied mutations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ReconcileReport {
    /// Total number of store mutations issued.
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

/// Translate a change set into store mutations, in change-set order.
///
/// New programs are inserted, updated programs get their full new asset
/// list written, removed programs are deleted, unchanged programs are left
/// alone.
pub fn plan(changes: &ChangeSet) -> Vec<Mutation> {
    changes
        .programs
        .iter()
        .filter_map(|change| {
            let name = change.name.clone();
            match &change.classification {
                Classification::New { assets } => Some(Mutation::Insert {
                    name,
                    assets: assets.clone(),
                }),
                Classification::Updated { assets, .. } => Some(Mutation::Update {
                    name,
                    assets: assets.clone(),
                }),
                Classification::Removed => Some(Mutation::Delete { name }),
                Classification::Unchanged => None,
            }
        })
        .collect()
}

/// Issue `mutations` against `store` in order, stopping at the first failure.
pub fn apply(
    store: &dyn DirectoryStore,
    mutations: &[Mutation],
) -> Result<ReconcileReport, ReconcileError> {
    let mut report = ReconcileReport::default();

    for mutation in mutations {
        let result = match mutation {
            Mutation::Insert { name, assets } => store
                .insert(name, assets)
                .map(|()| report.inserted += 1),
            Mutation::Update { name, assets } => store
                .update(name, assets)
                .map(|()| report.updated += 1),
            Mutation::Delete { name } => store.delete(name).map(|existed| {
                if !existed {
                    warn!(program = %name, "program already absent from store");
                }
                report.deleted += 1;
            }),
        };

        if let Err(source) = result {
            return Err(ReconcileError {
                applied: report.total(),
                mutation: mutation.to_string(),
                source,
            });
        }
        debug!(%mutation, "applied");
    }

    Ok(report)
}
