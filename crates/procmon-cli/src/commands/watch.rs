//! `pmon watch` - Browse a record stream interactively.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use clap::Args;
use procmon_common::config::ViewerConfig;
use procmon_tui::app::App;
use procmon_tui::terminal::{self, Tui};

use super::FilterArgs;
use crate::feed::{self, FeedMessage, FeedSource};

/// Arguments for the `watch` command.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Record file (JSON array or JSON lines) or monitor URL.
    pub source: String,

    /// Instance directory file mapping process ids to descriptions.
    #[arg(long)]
    pub instances: Option<PathBuf>,

    /// Record filters.
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Start with follow mode off.
    #[arg(long)]
    pub no_follow: bool,
}

/// Executes the `watch` command.
///
/// Starts polling the source in the background and runs the viewer until
/// the user quits.
///
/// # Errors
///
/// Returns an error if the instance file is unreadable or the terminal
/// cannot be driven.
pub fn execute(args: WatchArgs, config: &ViewerConfig) -> anyhow::Result<()> {
    let source = FeedSource::parse(&args.source);
    let mut app = App::new(config, (&args.filter).into());
    if args.no_follow {
        app.following = false;
    }
    if let Some(path) = &args.instances {
        app.set_instances(feed::load_instances(path)?);
    }

    tracing::info!(source = %source.name(), "starting viewer");
    let (tx, rx) = mpsc::channel();
    let _poller = feed::spawn(source, config.refresh_interval(), tx);

    ctrlc::set_handler(|| {
        terminal::restore();
        std::process::exit(130);
    })?;
    let mut tui = Tui::enter()?;
    procmon_tui::run(&mut tui, &mut app, config.tick_rate(), |app| drain(&rx, app))?;
    Ok(())
}

/// Applies every pending feed message to the app.
fn drain(rx: &Receiver<FeedMessage>, app: &mut App) {
    while let Ok(message) = rx.try_recv() {
        apply(app, message);
    }
}

fn apply(app: &mut App, message: FeedMessage) {
    app.loading = false;
    match message {
        FeedMessage::Update(update) => {
            if let Some(instances) = update.instances {
                app.set_instances(instances);
            }
            app.replace_records(update.records);
            app.set_status(None);
        }
        FeedMessage::Failed(error) => app.set_status(Some(error)),
    }
}

#[cfg(test)]
mod tests {
    use procmon_common::types::{InstanceDirectory, Record, Summary};
    use procmon_tui::app::RecordFilter;

    use super::*;
    use crate::feed::FeedUpdate;

    fn app() -> App {
        App::new(&ViewerConfig::default(), RecordFilter::default())
    }

    #[test]
    fn update_ends_loading_and_replaces_records() {
        let mut app = app();
        assert!(app.loading);
        let (tx, rx) = mpsc::channel();
        let instances: InstanceDirectory = std::iter::once((4, "svchost.exe".to_owned())).collect();
        tx.send(FeedMessage::Update(FeedUpdate {
            records: vec![Record::new(0, "t", 4, "spawn", Summary::default())],
            instances: Some(instances),
        }))
        .expect("send");

        drain(&rx, &mut app);
        assert!(!app.loading);
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.instances().describe(4), Some("svchost.exe"));
    }

    #[test]
    fn failure_keeps_records_and_sets_status() {
        let mut app = app();
        app.replace_records(vec![Record::new(0, "t", 4, "spawn", Summary::default())]);
        apply(&mut app, FeedMessage::Failed("connection refused".into()));
        assert!(!app.loading);
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.status(), Some("connection refused"));
    }
}
