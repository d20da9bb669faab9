use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("duplicate asset [ {name} | {asset_type} ] in program \"{program}\"")]
    DuplicateAsset {
        program: String,
        name: String,
        asset_type: String,
    },
}
