//! JSON-file directory store.
//!
//! The whole directory lives in one file holding an array of
//! [`ProgramDocument`]s, one per program, in name order. Every mutation
//! reads the file, applies the change, and replaces the file atomically by
//! writing a temporary file in the same directory and renaming it over the
//! previous file.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dh_types::{Asset, Directory, ProgramDocument};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::DirectoryStore;

type Programs = BTreeMap<String, Vec<Asset>>;

/// Directory store backed by a single JSON file.
///
/// A missing file is an empty store; the file is created on the first
/// mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_guard: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store for the file at `path`. No I/O happens until the first
    /// call; use [`ping`](DirectoryStore::ping) to check reachability.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn load(&self) -> StoreResult<Programs> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        let documents: Vec<ProgramDocument> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut programs = BTreeMap::new();
        for doc in documents {
            if programs.contains_key(&doc.name) {
                return Err(StoreError::Serialization(format!(
                    "duplicate program document \"{}\"",
                    doc.name
                )));
            }
            programs.insert(doc.name, doc.assets);
        }
        Ok(programs)
    }

    fn save(&self, programs: Programs) -> StoreResult<()> {
        let documents: Vec<ProgramDocument> = programs
            .into_iter()
            .map(|(name, assets)| ProgramDocument { name, assets })
            .collect();

        let tmp = tempfile::NamedTempFile::new_in(self.parent_dir())?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &documents)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    /// Load, apply `f`, and save, holding the write guard throughout.
    fn modify<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut Programs) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self.write_guard.lock().map_err(|e| StoreError::Query {
            op,
            reason: format!("lock poisoned: {e}"),
        })?;
        let mut programs = self.load()?;
        let out = f(&mut programs)?;
        self.save(programs)?;
        Ok(out)
    }
}

impl DirectoryStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn ping(&self) -> StoreResult<()> {
        let connection_error = |reason: String| StoreError::Connection {
            location: self.location(),
            reason,
        };

        let parent = self.parent_dir();
        if !parent.is_dir() {
            return Err(connection_error(format!(
                "directory {} does not exist",
                parent.display()
            )));
        }
        self.load()
            .map(|_| ())
            .map_err(|e| connection_error(e.to_string()))
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.load()?.len())
    }

    fn fetch_all(&self) -> StoreResult<Directory> {
        Ok(self.load()?.into_iter().collect())
    }

    fn insert(&self, name: &str, assets: &[Asset]) -> StoreResult<()> {
        self.modify("insert", |programs| {
            if programs.contains_key(name) {
                return Err(StoreError::DuplicateProgram(name.to_string()));
            }
            programs.insert(name.to_string(), assets.to_vec());
            Ok(())
        })?;
        debug!(program = name, assets = assets.len(), "inserted program");
        Ok(())
    }

    fn update(&self, name: &str, assets: &[Asset]) -> StoreResult<()> {
        self.modify("update", |programs| match programs.get_mut(name) {
            Some(stored) => {
                *stored = assets.to_vec();
                Ok(())
            }
            None => Err(StoreError::ProgramNotFound(name.to_string())),
        })?;
        debug!(program = name, assets = assets.len(), "updated program");
        Ok(())
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let _guard = self.write_guard.lock().map_err(|e| StoreError::Query {
            op: "delete",
            reason: format!("lock poisoned: {e}"),
        })?;
        let mut programs = self.load()?;
        if programs.remove(name).is_none() {
            return Ok(false);
        }
        self.save(programs)?;
        debug!(program = name, "deleted program");
        Ok(true)
    }

    fn insert_all(&self, directory: &Directory) -> StoreResult<usize> {
        let inserted = self.modify("insert_all", |programs| {
            for (name, _) in directory.iter() {
                if programs.contains_key(name) {
                    return Err(StoreError::DuplicateProgram(name.to_string()));
                }
            }
            for (name, assets) in directory.iter() {
                programs.insert(name.to_string(), assets.to_vec());
            }
            Ok(directory.len())
        })?;
        debug!(programs = inserted, "inserted full directory");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Directory {
        Directory::new()
            .with_program("acme", vec![Asset::new("acme.com", "URL", "high", true)])
            .with_program(
                "globex",
                vec![
                    Asset::new("globex.io", "URL", "medium", false),
                    Asset::new("globex-app", "SOURCE_CODE", "low", false),
                ],
            )
    }

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("directory.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = temp_store();
        store.ping().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn ping_fails_without_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("directory.json"));
        let err = store.ping().unwrap_err();
        assert!(err.is_connection());
    }

    #[test]
    fn ping_fails_on_corrupt_file() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), b"{ not json").unwrap();
        assert!(store.ping().unwrap_err().is_connection());
        assert!(matches!(
            store.count().unwrap_err(),
            StoreError::Serialization(_)
        ));
    }

    #[test]
    fn duplicate_program_documents_rejected() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            r#"[
                { "name": "acme", "assets": [] },
                { "name": "acme", "assets": [
                    { "name": "acme.com", "type": "URL", "severity": "high", "bounty": true }
                ] }
            ]"#,
        )
        .unwrap();

        assert!(matches!(
            store.count().unwrap_err(),
            StoreError::Serialization(msg) if msg.contains("acme")
        ));
        assert!(store.ping().unwrap_err().is_connection());
    }

    #[test]
    fn insert_all_then_reopen() {
        let (_dir, store) = temp_store();
        assert_eq!(store.insert_all(&sample()).unwrap(), 2);

        let reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.count().unwrap(), 2);
        assert_eq!(reopened.fetch_all().unwrap(), sample());
    }

    #[test]
    fn file_holds_one_document_per_program() {
        let (_dir, store) = temp_store();
        store.insert_all(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        let docs = raw.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["name"], "acme");
        assert_eq!(docs[0]["assets"][0]["type"], "URL");
    }

    #[test]
    fn update_and_delete_persist() {
        let (_dir, store) = temp_store();
        store.insert_all(&sample()).unwrap();

        let replacement = vec![Asset::new("acme.com", "URL", "critical", true)];
        store.update("acme", &replacement).unwrap();
        assert!(store.delete("globex").unwrap());
        assert!(!store.delete("globex").unwrap());

        let dir = JsonFileStore::new(store.path()).fetch_all().unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get("acme"), Some(replacement.as_slice()));
    }

    #[test]
    fn failed_insert_leaves_file_untouched() {
        let (_dir, store) = temp_store();
        store.insert_all(&sample()).unwrap();
        let before = fs::read(store.path()).unwrap();

        let err = store.insert("acme", &[]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateProgram(_)));
        assert!(matches!(
            store.update("initech", &[]).unwrap_err(),
            StoreError::ProgramNotFound(_)
        ));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }
}
