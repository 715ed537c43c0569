//! # pmon - procmon event viewer
//!
//! Browses the event stream captured by a process monitor, either live in a
//! terminal UI or as a plain table.

mod commands;
mod feed;
mod output;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.command.is_interactive())?;
    commands::execute(cli)
}

/// The interactive viewer owns the terminal, so without a log file its
/// logs are discarded rather than written over the UI.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}
