//! `pmon dump` - Print a record stream as a plain table.

use clap::Args;
use procmon_common::constants::EMPTY_MESSAGE;
use procmon_tui::app::RecordFilter;

use super::FilterArgs;
use crate::feed::FeedSource;
use crate::output;

/// Arguments for the `dump` command.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Record file (JSON array or JSON lines) or monitor URL.
    pub source: String,

    /// Record filters.
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Executes the `dump` command.
///
/// # Errors
///
/// Returns an error if the source cannot be read.
#[allow(clippy::print_stdout)]
pub fn execute(args: &DumpArgs) -> anyhow::Result<()> {
    let update = FeedSource::parse(&args.source).fetch()?;
    let filter = RecordFilter::from(&args.filter);
    let rows: Vec<_> = update.records.iter().filter(|r| filter.matches(r)).collect();

    if rows.is_empty() {
        println!("{EMPTY_MESSAGE}");
        return Ok(());
    }

    println!("{}", output::header());
    for (position, record) in rows.into_iter().enumerate() {
        println!("{}", output::format_row(position, record));
    }
    Ok(())
}
