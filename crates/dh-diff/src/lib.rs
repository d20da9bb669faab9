//! Diff engine for diff-hackerone.
//!
//! Compares the persisted directory against a freshly retrieved one and
//! classifies every program as new, updated, unchanged, or removed. The
//! computation is pure; rendering the result as a log narrative is a
//! separate step so it can be checked without any I/O.
//!
//! # Key Types
//!
//! - [`ProgramDiff`] / [`AssetChange`] -- Asset-level diff of one program
//! - [`ChangeSet`] / [`ProgramChange`] / [`Classification`] -- Directory-level diff
//! - [`render_changes`] -- Literal narrative lines for a change set

pub mod compare;
pub mod directory_diff;
pub mod program_diff;
pub mod report;

pub use compare::{assets_equal, find_asset};
pub use directory_diff::{diff_directories, ChangeSet, Classification, ProgramChange};
pub use program_diff::{diff_program, AssetChange, ProgramDiff};
pub use report::{
    bootstrap_line, connecting_line, render_changes, render_program, stored_count_line,
    DIRECTORY_UPDATED, RUN_FOOTER, RUN_HEADER,
};
