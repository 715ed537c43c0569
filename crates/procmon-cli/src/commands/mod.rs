//! CLI command definitions and dispatch.

pub mod dump;
pub mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use procmon_common::config::ViewerConfig;
use procmon_common::constants::BIN_NAME;
use procmon_tui::app::RecordFilter;

/// pmon - browse process monitor event streams.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Write logs to this file.
    #[arg(long, global = true, env = "PMON_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to a JSON viewer configuration file.
    #[arg(long, global = true, env = "PMON_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse a record stream interactively.
    Watch(watch::WatchArgs),
    /// Print a record stream as a plain table.
    Dump(dump::DumpArgs),
}

impl Command {
    /// Whether the command takes over the terminal.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Watch(_))
    }
}

/// Filter flags shared by the subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Show only records with this type tag.
    #[arg(long = "type", value_name = "TAG")]
    pub type_tag: Option<String>,

    /// Show only severe records.
    #[arg(long)]
    pub severe_only: bool,
}

impl From<&FilterArgs> for RecordFilter {
    fn from(args: &FilterArgs) -> Self {
        Self {
            type_tag: args.type_tag.clone(),
            severe_only: args.severe_only,
        }
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    match cli.command {
        Command::Watch(args) => watch::execute(args, &config),
        Command::Dump(args) => dump::execute(&args),
    }
}
