//! Directory snapshots and the persisted per-program document.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::error::TypeError;

/// A point-in-time mapping from program name to the program's assets.
///
/// Programs enumerate in ascending name order, so every pass over a
/// directory visits programs in the same sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    programs: BTreeMap<String, Vec<Asset>>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a program's asset list.
    pub fn insert(&mut self, name: impl Into<String>, assets: Vec<Asset>) {
        self.programs.insert(name.into(), assets);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_program(mut self, name: impl Into<String>, assets: Vec<Asset>) -> Self {
        self.insert(name, assets);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[Asset]> {
        self.programs.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    /// Number of programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns `true` if the directory has no programs.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Iterate `(program name, assets)` in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Asset])> {
        self.programs
            .iter()
            .map(|(name, assets)| (name.as_str(), assets.as_slice()))
    }

    /// Program names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    /// Check that no program holds two assets with the same `(name, type)`
    /// identity.
    pub fn validate(&self) -> Result<(), TypeError> {
        for (program, assets) in &self.programs {
            let mut seen = HashSet::with_capacity(assets.len());
            for asset in assets {
                if !seen.insert(asset.key()) {
                    return Err(TypeError::DuplicateAsset {
                        program: program.clone(),
                        name: asset.name.clone(),
                        asset_type: asset.asset_type.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Split into one [`ProgramDocument`] per program, in name order.
    pub fn into_documents(self) -> Vec<ProgramDocument> {
        self.programs
            .into_iter()
            .map(|(name, assets)| ProgramDocument { name, assets })
            .collect()
    }
}

impl FromIterator<(String, Vec<Asset>)> for Directory {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Asset>)>>(iter: I) -> Self {
        Self {
            programs: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<ProgramDocument> for Directory {
    fn from_iter<I: IntoIterator<Item = ProgramDocument>>(iter: I) -> Self {
        iter.into_iter().map(|doc| (doc.name, doc.assets)).collect()
    }
}

/// The persisted record for one program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDocument {
    pub name: String,
    pub assets: Vec<Asset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, kind: &str) -> Asset {
        Asset::new(name, kind, "low", false)
    }

    #[test]
    fn iteration_is_name_ordered() {
        let dir = Directory::new()
            .with_program("zeta", vec![])
            .with_program("alpha", vec![])
            .with_program("mid", vec![]);

        let names: Vec<&str> = dir.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn validate_accepts_same_name_different_type() {
        let dir = Directory::new().with_program(
            "prog",
            vec![asset("example.com", "URL"), asset("example.com", "WILDCARD")],
        );
        assert!(dir.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_identity() {
        let dir = Directory::new().with_program(
            "prog",
            vec![asset("example.com", "URL"), asset("example.com", "URL")],
        );
        assert_eq!(
            dir.validate(),
            Err(TypeError::DuplicateAsset {
                program: "prog".into(),
                name: "example.com".into(),
                asset_type: "URL".into(),
            })
        );
    }

    #[test]
    fn validate_accepts_empty_program_name() {
        let dir = Directory::new().with_program("", vec![asset("x", "URL")]);
        assert!(dir.validate().is_ok());
        assert!(dir.contains(""));
    }

    #[test]
    fn documents_rebuild_the_same_directory() {
        let dir = Directory::new()
            .with_program("b", vec![asset("y", "URL")])
            .with_program("a", vec![asset("x", "URL")]);

        let docs = dir.clone().into_documents();
        assert_eq!(docs[0].name, "a");
        assert_eq!(docs[1].name, "b");

        let rebuilt: Directory = docs.into_iter().collect();
        assert_eq!(rebuilt, dir);
    }

    #[test]
    fn serializes_as_plain_map() {
        let dir = Directory::new().with_program("prog", vec![asset("x", "URL")]);
        let json = serde_json::to_value(&dir).unwrap();
        assert!(json.is_object());
        assert_eq!(json["prog"][0]["name"], "x");
    }
}
