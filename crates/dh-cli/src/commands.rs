use anyhow::Context;
use colored::Colorize;
use dh_store::{DirectoryStore, JsonFileStore};
use dh_sync::{Engine, JsonFileSource, RunMode, RunSummary};
use dh_types::Directory;

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli, config: Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&config.store_path);
    match cli.command {
        Command::Run(_) => cmd_run(store, &config, RunMode::Apply, &cli.format),
        Command::Diff(_) => cmd_run(store, &config, RunMode::DryRun, &cli.format),
        Command::Status(_) => cmd_status(&store, &cli.format),
    }
}

fn cmd_run(
    store: JsonFileStore,
    config: &Config,
    mode: RunMode,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let source = JsonFileSource::new(config.snapshot_path()?);
    let summary = Engine::new(store)
        .run(&source, mode)
        .context("diff-hackerone run aborted")?;

    match format {
        OutputFormat::Text => println!("{}", summary_line(&summary, mode)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary.changes)?),
    }
    Ok(())
}

fn cmd_status(store: &JsonFileStore, format: &OutputFormat) -> anyhow::Result<()> {
    store.ping()?;
    let directory = store.fetch_all()?;
    match format {
        OutputFormat::Text => {
            for line in status_lines(&store.location(), &directory) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&directory)?),
    }
    Ok(())
}

fn summary_line(summary: &RunSummary, mode: RunMode) -> String {
    let changes = &summary.changes;
    let counts = format!(
        "{} new, {} updated, {} removed",
        changes.new_programs(),
        changes.updated_programs(),
        changes.removed_programs()
    );
    match mode {
        RunMode::DryRun => format!("{} Dry run: {} (store untouched)", "•".cyan(), counts),
        RunMode::Apply if summary.bootstrapped => format!(
            "{} Seeded store with {} programs",
            "✓".green().bold(),
            summary.reconciled.inserted.to_string().bold()
        ),
        RunMode::Apply => format!(
            "{} {}; {} store writes",
            "✓".green().bold(),
            counts,
            summary.reconciled.total().to_string().bold()
        ),
    }
}

fn status_lines(location: &str, directory: &Directory) -> Vec<String> {
    let mut lines = vec![format!(
        "{} stored programs in {}",
        directory.len().to_string().bold(),
        location.bold()
    )];
    lines.extend(directory.iter().map(|(name, assets)| {
        let paid = assets.iter().filter(|a| a.bounty).count();
        format!("  {} ({} assets, {} paid)", name.yellow(), assets.len(), paid)
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use dh_store::InMemoryDirectoryStore;
    use dh_sync::StaticSource;
    use dh_types::Asset;

    fn directory() -> Directory {
        Directory::new()
            .with_program(
                "acme",
                vec![
                    Asset::new("acme.com", "URL", "high", true),
                    Asset::new("acme-app", "SOURCE_CODE", "low", false),
                ],
            )
            .with_program("globex", vec![])
    }

    #[test]
    fn summary_line_reports_counts() {
        colored::control::set_override(false);
        let old = Directory::new().with_program("acme", vec![]);
        let engine = Engine::new(InMemoryDirectoryStore::with_directory(&old));
        let summary = engine
            .run(&StaticSource::new(directory()), RunMode::Apply)
            .unwrap();

        assert_eq!(
            summary_line(&summary, RunMode::Apply),
            "✓ 1 new, 1 updated, 0 removed; 2 store writes"
        );
    }

    #[test]
    fn summary_line_for_bootstrap() {
        colored::control::set_override(false);
        let engine = Engine::new(InMemoryDirectoryStore::new());
        let summary = engine
            .run(&StaticSource::new(directory()), RunMode::Apply)
            .unwrap();
        assert_eq!(
            summary_line(&summary, RunMode::Apply),
            "✓ Seeded store with 2 programs"
        );
    }

    #[test]
    fn status_lists_programs() {
        colored::control::set_override(false);
        let lines = status_lines("dir.json", &directory());
        assert_eq!(
            lines,
            vec![
                "2 stored programs in dir.json",
                "  acme (2 assets, 1 paid)",
                "  globex (0 assets, 0 paid)",
            ]
        );
    }

    #[test]
    fn run_and_status_against_files() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        std::fs::write(&snapshot, serde_json::to_vec(&directory()).unwrap()).unwrap();

        let config = Config {
            store_path: dir.path().join("directory.json"),
            snapshot_path: Some(snapshot),
            log_file: None,
        };
        let store = JsonFileStore::new(&config.store_path);
        cmd_run(store, &config, RunMode::Apply, &OutputFormat::Json).unwrap();

        let store = JsonFileStore::new(&config.store_path);
        assert_eq!(store.fetch_all().unwrap(), directory());
        cmd_status(&store, &OutputFormat::Text).unwrap();
    }

    #[test]
    fn run_without_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store_path: dir.path().join("directory.json"),
            snapshot_path: None,
            log_file: None,
        };
        let store = JsonFileStore::new(&config.store_path);
        assert!(cmd_run(store, &config, RunMode::DryRun, &OutputFormat::Text).is_err());
    }
}
