use clap::Parser;

mod cli;
mod commands;
mod config;
mod logging;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::Config::resolve(&cli)?;
    logging::init(cli.verbose, config.log_file.as_deref())?;
    tracing::debug!(?config, "configuration resolved");
    commands::run_command(cli, config)
}
