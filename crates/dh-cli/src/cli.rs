use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "diff-hackerone",
    about = "Track bug bounty program scope changes between directory snapshots",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory store file (overrides the configuration)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Append log output to this file (overrides the configuration)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff a snapshot against the store and reconcile the store
    Run(SnapshotArgs),
    /// Report differences without writing to the store
    Diff(SnapshotArgs),
    /// Show the stored directory
    Status(StatusArgs),
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// JSON snapshot of the program directory (overrides the configuration)
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Args)]
pub struct StatusArgs {}

impl Command {
    pub fn snapshot(&self) -> Option<&PathBuf> {
        match self {
            Command::Run(args) | Command::Diff(args) => args.snapshot.as_ref(),
            Command::Status(_) => None,
        }
    }
}
