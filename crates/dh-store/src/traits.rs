use dh_types::{Asset, Directory};

use crate::error::StoreResult;

/// Name-keyed storage for the program directory.
///
/// Implementations must satisfy these invariants:
/// - At most one record per program name.
/// - `update` is a wholesale replacement of the stored asset list.
/// - A failed call leaves the record it targeted unchanged.
/// - All backend errors are propagated, never silently ignored.
pub trait DirectoryStore: Send + Sync {
    /// Human-readable description of where the data lives.
    fn location(&self) -> String;

    /// Check that the backend is reachable.
    ///
    /// Returns `Err(StoreError::Connection { .. })` if it is not.
    fn ping(&self) -> StoreResult<()>;

    /// Number of stored programs.
    fn count(&self) -> StoreResult<usize>;

    /// Read every stored program.
    fn fetch_all(&self) -> StoreResult<Directory>;

    /// Store a program that is not yet present.
    ///
    /// Fails with `StoreError::DuplicateProgram` if the name is taken.
    fn insert(&self, name: &str, assets: &[Asset]) -> StoreResult<()>;

    /// Replace the asset list of a stored program.
    ///
    /// Fails with `StoreError::ProgramNotFound` if the name is absent.
    fn update(&self, name: &str, assets: &[Asset]) -> StoreResult<()>;

    /// Delete a program by name. Returns `true` if the program existed.
    fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Insert every program of `directory`.
    ///
    /// Default implementation calls `insert()` for each program and stops at
    /// the first failure.
    fn insert_all(&self, directory: &Directory) -> StoreResult<usize> {
        let mut inserted = 0;
        for (name, assets) in directory.iter() {
            self.insert(name, assets)?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
