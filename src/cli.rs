//! CLI argument parsing for the audit workflows.
//!
//! The CLI only wires a snapshot directory to the audit core; all policy lives
//! in the config and the core modules.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "forge-audit",
    version,
    about = "Audit Forge modules and their GitHub repositories for metadata drift",
    after_help = "Snapshot layout:\n  <DIR>/repositories.json         [{\"name\": ..., \"topics\": [...]}, ...]\n  <DIR>/modules.json              [{\"slug\": ..., \"endorsement\": ..., \"metadata\": {\"source\": ...}}, ...]\n  <DIR>/missing_readme_note.json  [\"<org>/<repo>\", ...]\n\nExamples:\n  forge-audit report --snapshot /tmp/snapshot\n  forge-audit report --snapshot /tmp/snapshot --out /tmp/audit --json\n  forge-audit module-repos --snapshot /tmp/snapshot\n  forge-audit config",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Report(ReportArgs),
    ModuleRepos(ModuleReposArgs),
    Config(ConfigArgs),
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Report(args) => args.verbose,
            Command::ModuleRepos(args) => args.verbose,
            Command::Config(_) => false,
        }
    }
}

/// Report command inputs.
#[derive(Parser, Debug)]
#[command(about = "Reconcile modules against repositories and render the drift report")]
pub struct ReportArgs {
    /// Snapshot directory holding repositories.json, modules.json and missing_readme_note.json
    #[arg(long, value_name = "DIR")]
    pub snapshot: PathBuf,

    /// Directory to write outputs to (default: stdout)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Path to a config JSON file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also publish the findings as JSON (report_findings)
    #[arg(long)]
    pub json: bool,

    /// Emit debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Module-repos command inputs.
#[derive(Parser, Debug)]
#[command(about = "List module repositories, unsupported ones, and ones without a support tier")]
pub struct ModuleReposArgs {
    /// Snapshot directory holding repositories.json
    #[arg(long, value_name = "DIR")]
    pub snapshot: PathBuf,

    /// Directory to write outputs to (default: stdout)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Path to a config JSON file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Config command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print the effective config as JSON")]
pub struct ConfigArgs {
    /// Path to a config JSON file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
