//! Change reporter: render a [`ChangeSet`] as literal log lines.
//!
//! Rendering is pure. The caller decides where the lines go.
//!
//! Per updated program the order is fixed: added assets, then changed
//! assets, then the dead-asset notice. New programs list all their assets.
//! Unchanged programs render nothing.

use dh_types::Asset;

use crate::directory_diff::{ChangeSet, Classification, ProgramChange};

/// First line of every run.
pub const RUN_HEADER: &str = "== diff-hackerone ==";
/// Last line of every completed run.
pub const RUN_FOOTER: &str = "== end diff-hackerone ==";
/// Emitted once the store matches the new directory.
pub const DIRECTORY_UPDATED: &str = "Updated program directory";

pub fn connecting_line(location: &str) -> String {
    format!("Connecting to {location}")
}

pub fn stored_count_line(count: usize) -> String {
    format!("Number of stored programs: {count}")
}

pub fn bootstrap_line(location: &str) -> String {
    format!("Inserting full directory into {location}")
}

/// Render every program of `changes`, in change-set order.
pub fn render_changes(changes: &ChangeSet) -> Vec<String> {
    changes.programs.iter().flat_map(render_program).collect()
}

/// Render a single program's classification.
pub fn render_program(change: &ProgramChange) -> Vec<String> {
    let name = &change.name;
    let mut lines = Vec::new();

    match &change.classification {
        Classification::New { assets } => {
            lines.push(format!(
                "New program \"{name}\" found with the following assets:"
            ));
            lines.extend(assets.iter().map(asset_line));
        }
        Classification::Updated { diff, .. } => {
            if !diff.added.is_empty() {
                lines.push(format!("New asset(s) for program \"{name}\" found:"));
                lines.extend(diff.added.iter().map(asset_line));
            }
            if !diff.changed.is_empty() {
                lines.push(format!("Changed asset(s) for program \"{name}\" found:"));
                lines.extend(
                    diff.changed
                        .iter()
                        .map(|c| format!("\t{} -> {}", c.old, c.new)),
                );
            }
            if diff.count_shrank {
                lines.push(format!("Deleting dead asset(s) from program \"{name}\""));
            }
        }
        Classification::Removed => {
            lines.push(format!("Deleting dead program \"{name}\""));
        }
        Classification::Unchanged => {}
    }

    lines
}

fn asset_line(asset: &Asset) -> String {
    format!("\t{asset}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory_diff::diff_directories;
    use dh_types::Directory;

    fn asset(name: &str, kind: &str, severity: &str, bounty: bool) -> Asset {
        Asset::new(name, kind, severity, bounty)
    }

    #[test]
    fn changed_program_then_new_program() {
        let old = Directory::new().with_program("ProgA", vec![asset("x", "xss", "low", false)]);
        let new = Directory::new()
            .with_program("ProgA", vec![asset("x", "xss", "high", false)])
            .with_program("ProgB", vec![asset("y", "sqli", "crit", true)]);

        let lines = render_changes(&diff_directories(&old, &new));
        assert_eq!(
            lines,
            vec![
                "Changed asset(s) for program \"ProgA\" found:",
                "\t[ x | xss | low | free ] -> [ x | xss | high | free ]",
                "New program \"ProgB\" found with the following assets:",
                "\t[ y | sqli | crit | paid ]",
            ]
        );
    }

    #[test]
    fn updated_program_block_order() {
        let old = Directory::new().with_program(
            "acme",
            vec![
                asset("a", "URL", "low", false),
                asset("b", "URL", "low", false),
                asset("c", "URL", "low", false),
            ],
        );
        let new = Directory::new().with_program(
            "acme",
            vec![asset("a", "URL", "medium", true), asset("d", "URL", "low", false)],
        );

        let lines = render_changes(&diff_directories(&old, &new));
        assert_eq!(
            lines,
            vec![
                "New asset(s) for program \"acme\" found:",
                "\t[ d | URL | low | free ]",
                "Changed asset(s) for program \"acme\" found:",
                "\t[ a | URL | low | free ] -> [ a | URL | medium | paid ]",
                "Deleting dead asset(s) from program \"acme\"",
            ]
        );
    }

    #[test]
    fn removed_program_line() {
        let old = Directory::new().with_program("gone", vec![asset("a", "URL", "low", false)]);
        let lines = render_changes(&diff_directories(&old, &Directory::new()));
        assert_eq!(lines, vec!["Deleting dead program \"gone\""]);
    }

    #[test]
    fn new_program_without_assets() {
        let new = Directory::new().with_program("empty", vec![]);
        let lines = render_changes(&diff_directories(&Directory::new(), &new));
        assert_eq!(
            lines,
            vec!["New program \"empty\" found with the following assets:"]
        );
    }

    #[test]
    fn unchanged_renders_nothing() {
        let dir = Directory::new().with_program("same", vec![asset("a", "URL", "low", false)]);
        assert!(render_changes(&diff_directories(&dir, &dir)).is_empty());
    }

    #[test]
    fn fixed_lines() {
        assert_eq!(connecting_line("store.json"), "Connecting to store.json");
        assert_eq!(stored_count_line(3), "Number of stored programs: 3");
        assert_eq!(
            bootstrap_line("store.json"),
            "Inserting full directory into store.json"
        );
    }
}
