//! Asset-level diff of a single program.

use dh_types::Asset;
use serde::Serialize;

use crate::compare::{assets_equal, find_asset};

/// An asset whose identity survived but whose attributes changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetChange {
    pub old: Asset,
    pub new: Asset,
}

/// The result of comparing one program's old and new asset lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProgramDiff {
    /// Assets whose identity does not appear in the old list, in new-list order.
    pub added: Vec<Asset>,
    /// Assets present in both lists with differing attributes, in new-list order.
    pub changed: Vec<AssetChange>,
    /// The new list holds fewer surviving assets than the old one.
    ///
    /// This only says that something was removed; which asset it was is not
    /// tracked.
    pub count_shrank: bool,
    /// The program must be rewritten in the store.
    pub updated: bool,
}

impl ProgramDiff {
    /// Returns `true` if the program needs no store write.
    pub fn is_unchanged(&self) -> bool {
        !self.updated
    }
}

/// Compare a program's `old` and `new` asset lists.
///
/// Every asset of `new` is looked up by `(name, type)` in `old`: a miss is
/// an addition, a hit with different attributes is a change. The program is
/// updated if either happened or if the list lengths differ.
pub fn diff_program(old: &[Asset], new: &[Asset]) -> ProgramDiff {
    let mut diff = ProgramDiff {
        updated: new.len() != old.len(),
        ..ProgramDiff::default()
    };

    for asset in new {
        match find_asset(asset.key(), old) {
            None => {
                diff.added.push(asset.clone());
                diff.updated = true;
            }
            Some(existing) if !assets_equal(existing, asset) => {
                diff.changed.push(AssetChange {
                    old: existing.clone(),
                    new: asset.clone(),
                });
                diff.updated = true;
            }
            Some(_) => {}
        }
    }

    diff.count_shrank = new.len() - diff.added.len() < old.len();
    diff
}
