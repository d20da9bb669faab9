use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Settings read from the optional TOML file, then overridden by flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("diff-hackerone.directory.json"),
            snapshot_path: None,
            log_file: Some(PathBuf::from("diff.log")),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Load the configured file (or defaults) and apply command-line overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(store) = &cli.store {
            config.store_path = store.clone();
        }
        if let Some(log_file) = &cli.log_file {
            config.log_file = Some(log_file.clone());
        }
        if let Some(snapshot) = cli.command.snapshot() {
            config.snapshot_path = Some(snapshot.clone());
        }
        Ok(config)
    }

    pub fn snapshot_path(&self) -> anyhow::Result<&Path> {
        match &self.snapshot_path {
            Some(path) => Ok(path),
            None => bail!("no snapshot given; pass --snapshot or set snapshot_path"),
        }
    }
}
