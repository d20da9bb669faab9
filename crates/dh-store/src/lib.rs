//! Persistence gateway for the program directory.
//!
//! The store holds exactly one record per program, keyed by program name.
//! It is the "previous" side of every diff and the target of every
//! reconciliation.
//!
//! # Storage Backends
//!
//! All backends implement the [`DirectoryStore`] trait:
//!
//! - [`InMemoryDirectoryStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`JsonFileStore`] -- single JSON file of program documents, rewritten atomically
//!
//! # Design Rules
//!
//! 1. Program names are unique; `insert` never overwrites and `update` never creates.
//! 2. `update` replaces the whole asset list. Assets are never patched individually.
//! 3. Every call reports failure through [`StoreResult`]; the caller picks the policy.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryDirectoryStore;
pub use traits::DirectoryStore;
