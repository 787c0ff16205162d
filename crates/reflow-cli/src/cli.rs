use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "reflow",
    about = "Reflow: identity-based reconciliation of sectioned lists",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the batch that turns one snapshot file into another
    Diff(DiffArgs),
    /// Reconcile an in-memory surface from OLD to NEW and check the result
    Verify(VerifyArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot before the change (JSON)
    pub old: PathBuf,
    /// Snapshot after the change (JSON)
    pub new: PathBuf,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Snapshot before the change (JSON)
    pub old: PathBuf,
    /// Snapshot after the change (JSON)
    pub new: PathBuf,
    /// Director configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Director configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
