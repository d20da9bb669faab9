use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use dh_types::{Asset, Directory};

use crate::error::{StoreError, StoreResult};
use crate::traits::DirectoryStore;

type Programs = BTreeMap<String, Vec<Asset>>;

/// In-memory, `BTreeMap`-based directory store.
///
/// Intended for tests and embedding. Data is lost when the store is dropped.
pub struct InMemoryDirectoryStore {
    programs: RwLock<Programs>,
}

impl InMemoryDirectoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            programs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with `directory`.
    pub fn with_directory(directory: &Directory) -> Self {
        let programs = directory
            .iter()
            .map(|(name, assets)| (name.to_string(), assets.to_vec()))
            .collect();
        Self {
            programs: RwLock::new(programs),
        }
    }

    fn read_lock(&self, op: &'static str) -> StoreResult<RwLockReadGuard<'_, Programs>> {
        self.programs.read().map_err(|e| StoreError::Query {
            op,
            reason: format!("lock poisoned: {e}"),
        })
    }

    fn write_lock(&self, op: &'static str) -> StoreResult<RwLockWriteGuard<'_, Programs>> {
        self.programs.write().map_err(|e| StoreError::Query {
            op,
            reason: format!("lock poisoned: {e}"),
        })
    }
}

impl Default for InMemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryStore for InMemoryDirectoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn ping(&self) -> StoreResult<()> {
        self.read_lock("ping").map(|_| ())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read_lock("count")?.len())
    }

    fn fetch_all(&self) -> StoreResult<Directory> {
        let programs = self.read_lock("fetch_all")?;
        Ok(programs
            .iter()
            .map(|(name, assets)| (name.clone(), assets.clone()))
            .collect())
    }

    fn insert(&self, name: &str, assets: &[Asset]) -> StoreResult<()> {
        let mut programs = self.write_lock("insert")?;
        if programs.contains_key(name) {
            return Err(StoreError::DuplicateProgram(name.to_string()));
        }
        programs.insert(name.to_string(), assets.to_vec());
        Ok(())
    }

    fn update(&self, name: &str, assets: &[Asset]) -> StoreResult<()> {
        let mut programs = self.write_lock("update")?;
        match programs.get_mut(name) {
            Some(stored) => {
                *stored = assets.to_vec();
                Ok(())
            }
            None => Err(StoreError::ProgramNotFound(name.to_string())),
        }
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let mut programs = self.write_lock("delete")?;
        Ok(programs.remove(name).is_some())
    }
}

impl std::fmt::Debug for InMemoryDirectoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.count().unwrap_or_default();
        f.debug_struct("InMemoryDirectoryStore")
            .field("program_count", &count)
            .finish()
    }
}
