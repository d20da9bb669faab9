//! Foundation types for diff-hackerone.
//!
//! A *directory* is a point-in-time snapshot of the bug bounty program
//! catalog: every program name mapped to the assets it owns. Two directories
//! exist per run, the persisted one and the freshly retrieved one, and every
//! other crate in the workspace works in terms of these values.
//!
//! # Key Types
//!
//! - [`Asset`] / [`AssetKey`] -- An asset record and its `(name, type)` identity key
//! - [`Directory`] -- Program name to asset list mapping, ordered by program name
//! - [`ProgramDocument`] -- The persisted per-program record
//! - [`TypeError`] -- Validation failures

pub mod asset;
pub mod directory;
pub mod error;

pub use asset::{Asset, AssetKey};
pub use directory::{Directory, ProgramDocument};
pub use error::TypeError;
