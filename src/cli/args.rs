//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, init::InitArgs, rm::RmArgs, show::ShowArgs,
};

#[derive(Parser)]
#[command(name = "partdb")]
#[command(author, version, about = "Electronic parts database for KiCad")]
#[command(
    long_about = "Normalize distributor part data into canonical records and keep them in a SQLite parts database."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Config file (default: per-user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Print a message for every table and component touched
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a config file and an empty database
    Init(InitArgs),

    /// Add parts from a distributor or a CSV file
    Add(AddArgs),

    /// Remove parts by IPN, MPN or distributor part number
    Rm(RmArgs),

    /// Show database contents
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
