//! Directory-level diff: classify every program of two snapshots.
//!
//! Programs of the new directory are visited in its enumeration order and
//! matched against the old one. Each match consumes the old name; whatever
//! is left unconsumed afterwards was removed. Every name of `old ∪ new`
//! therefore appears in the result exactly once.

use std::collections::BTreeSet;

use dh_types::{Asset, Directory};
use serde::Serialize;

use crate::program_diff::{diff_program, ProgramDiff};

/// How a program differs between the old and new directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Present only in the new directory.
    New { assets: Vec<Asset> },
    /// Present in both, with asset differences.
    Updated { assets: Vec<Asset>, diff: ProgramDiff },
    /// Present in both and identical.
    Unchanged,
    /// Present only in the old directory.
    Removed,
}

/// One program's entry in a [`ChangeSet`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgramChange {
    pub name: String,
    pub classification: Classification,
}

/// The classified difference between two directories.
///
/// New-directory programs come first in new-directory order, followed by
/// removed programs in old-directory order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub programs: Vec<ProgramChange>,
}

impl ChangeSet {
    /// Returns `true` if every program is unchanged.
    pub fn is_empty(&self) -> bool {
        self.programs
            .iter()
            .all(|p| matches!(p.classification, Classification::Unchanged))
    }

    /// Number of classified programs, unchanged ones included.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Number of new programs.
    pub fn new_programs(&self) -> usize {
        self.count(|c| matches!(c, Classification::New { .. }))
    }

    /// Number of updated programs.
    pub fn updated_programs(&self) -> usize {
        self.count(|c| matches!(c, Classification::Updated { .. }))
    }

    /// Number of removed programs.
    pub fn removed_programs(&self) -> usize {
        self.count(|c| matches!(c, Classification::Removed))
    }

    /// Look up the classification of a program by name.
    pub fn get(&self, name: &str) -> Option<&Classification> {
        self.programs
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.classification)
    }

    fn count(&self, pred: impl Fn(&Classification) -> bool) -> usize {
        self.programs
            .iter()
            .filter(|p| pred(&p.classification))
            .count()
    }
}

/// Compute the change set that turns `old` into `new`.
pub fn diff_directories(old: &Directory, new: &Directory) -> ChangeSet {
    let mut remaining: BTreeSet<&str> = old.names().collect();
    let mut programs = Vec::with_capacity(new.len());

    for (name, new_assets) in new.iter() {
        let classification = match old.get(name) {
            None => Classification::New {
                assets: new_assets.to_vec(),
            },
            Some(old_assets) => {
                let diff = diff_program(old_assets, new_assets);
                if diff.updated {
                    Classification::Updated {
                        assets: new_assets.to_vec(),
                        diff,
                    }
                } else {
                    Classification::Unchanged
                }
            }
        };
        remaining.remove(name);
        programs.push(ProgramChange {
            name: name.to_string(),
            classification,
        });
    }

    programs.extend(remaining.into_iter().map(|name| ProgramChange {
        name: name.to_string(),
        classification: Classification::Removed,
    }));

    ChangeSet { programs }
}
