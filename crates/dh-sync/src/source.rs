//! Where the new directory comes from.
//!
//! Scraping the upstream program directory is done elsewhere; the engine
//! only needs the result as a [`Directory`]. Every backend validates the
//! directory before handing it out.

use std::fs;
use std::path::{Path, PathBuf};

use dh_types::Directory;
use tracing::debug;

use crate::error::RetrievalError;

/// Supplies the freshly retrieved directory for a run.
pub trait SnapshotSource {
    fn fetch_directory(&self) -> Result<Directory, RetrievalError>;
}

/// Reads a JSON object mapping program name to asset array:
///
/// ```json
/// { "acme": [ { "name": "acme.com", "type": "URL", "severity": "high", "bounty": true } ] }
/// ```
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn fetch_directory(&self) -> Result<Directory, RetrievalError> {
        let bytes = fs::read(&self.path).map_err(|source| RetrievalError::Io {
            path: self.path.clone(),
            source,
        })?;
        let directory: Directory =
            serde_json::from_slice(&bytes).map_err(|e| RetrievalError::Parse(e.to_string()))?;
        directory.validate()?;
        debug!(path = %self.path.display(), programs = directory.len(), "snapshot loaded");
        Ok(directory)
    }
}

/// Hands out a fixed directory.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    directory: Directory,
}

impl StaticSource {
    pub fn new(directory: Directory) -> Self {
        Self { directory }
    }
}

impl SnapshotSource for StaticSource {
    fn fetch_directory(&self) -> Result<Directory, RetrievalError> {
        self.directory.validate()?;
        Ok(self.directory.clone())
    }
}
