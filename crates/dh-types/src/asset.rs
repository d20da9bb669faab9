use std::fmt;

use serde::{Deserialize, Serialize};

/// A single in-scope item of a program.
///
/// `name` and `asset_type` form the identity key: two assets with the same
/// name but different types are distinct. `severity` and `bounty` are the
/// mutable attributes compared across snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub severity: String,
    pub bounty: bool,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        asset_type: impl Into<String>,
        severity: impl Into<String>,
        bounty: bool,
    ) -> Self {
        Self {
            name: name.into(),
            asset_type: asset_type.into(),
            severity: severity.into(),
            bounty,
        }
    }

    /// The identity key of this asset.
    pub fn key(&self) -> AssetKey<'_> {
        AssetKey {
            name: &self.name,
            asset_type: &self.asset_type,
        }
    }

    /// `"paid"` when the asset is eligible for a bounty, `"free"` otherwise.
    pub fn bounty_label(&self) -> &'static str {
        if self.bounty {
            "paid"
        } else {
            "free"
        }
    }
}

/// Renders as `[ name | type | severity | paid ]` (or `free`).
impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ {} | {} | {} | {} ]",
            self.name,
            self.asset_type,
            self.severity,
            self.bounty_label()
        )
    }
}

/// Borrowed `(name, type)` identity key of an [`Asset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey<'a> {
    pub name: &'a str,
    pub asset_type: &'a str,
}

impl<'a> AssetKey<'a> {
    pub fn new(name: &'a str, asset_type: &'a str) -> Self {
        Self { name, asset_type }
    }

    /// Returns `true` if `asset` carries this identity.
    pub fn matches(&self, asset: &Asset) -> bool {
        asset.name == self.name && asset.asset_type == self.asset_type
    }
}
