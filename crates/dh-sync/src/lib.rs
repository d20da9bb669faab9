//! Snapshot retrieval, reconciliation, and the run engine.
//!
//! One run reads the new directory from a [`SnapshotSource`], reads the
//! previous directory from a [`DirectoryStore`](dh_store::DirectoryStore),
//! reports the differences, and rewrites the store until it matches the
//! new directory.
//!
//! # Modules
//!
//! - [`source`] -- The [`SnapshotSource`] trait and its backends
//! - [`reconcile`] -- [`plan`] and [`apply`]: change set to store mutations
//! - [`engine`] -- [`Engine`], which sequences a whole run
//! - [`error`] -- Error types

pub mod engine;
pub mod error;
pub mod reconcile;
pub mod source;

pub use engine::{Engine, RunMode, RunSummary};
pub use error::{EngineError, ReconcileError, RetrievalError};
pub use reconcile::{apply, plan, Mutation, ReconcileReport};
pub use source::{JsonFileSource, SnapshotSource, StaticSource};
