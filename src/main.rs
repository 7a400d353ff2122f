use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod cli;
mod config;
mod index;
mod matcher;
mod modules;
mod provider;
mod reconcile;
mod records;
mod report;
mod workflow;

use cli::{Command, ConfigArgs, ModuleReposArgs, ReportArgs, RootArgs};
use provider::SnapshotDir;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.command.verbose());

    match args.command {
        Command::Report(args) => cmd_report(args),
        Command::ModuleRepos(args) => cmd_module_repos(args),
        Command::Config(args) => cmd_config(args),
    }
}

/// Logs go to stderr so stdout stays reserved for published outputs.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let config = config::resolve_config(args.config.as_deref())?;
    let mut provider = SnapshotDir::new(args.snapshot, args.out);
    workflow::run_report(&mut provider, &config, args.json)?;
    Ok(())
}

fn cmd_module_repos(args: ModuleReposArgs) -> Result<()> {
    let config = config::resolve_config(args.config.as_deref())?;
    let mut provider = SnapshotDir::new(args.snapshot, args.out);
    workflow::run_module_repos(&mut provider, &config)?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    let config = config::resolve_config(args.config.as_deref())?;
    println!("{}", config::config_json(&config)?);
    Ok(())
}
