//! Asset comparison and identity lookup.

use dh_types::{Asset, AssetKey};

/// Returns `true` if the two assets carry the same type, severity and
/// bounty flag. Names are not compared; the caller has already matched them.
pub fn assets_equal(a: &Asset, b: &Asset) -> bool {
    a.asset_type == b.asset_type && a.severity == b.severity && a.bounty == b.bounty
}

/// Find the asset with identity `key` in `assets`.
///
/// Identity keys are unique within a program, so the first match is the
/// only one. `None` means the asset is new to `assets`.
pub fn find_asset<'a>(key: AssetKey<'_>, assets: &'a [Asset]) -> Option<&'a Asset> {
    assets.iter().find(|asset| key.matches(asset))
}
