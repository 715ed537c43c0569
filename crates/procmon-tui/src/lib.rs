//! # procmon-tui
//!
//! Live terminal event list for procmon.
//!
//! Built with `ratatui` and `crossterm`, providing:
//! - A loading / populated / empty lifecycle with skeleton rows.
//! - Type tag badges and structured summaries with hover tooltips.
//! - Follow mode that scrolls the newest record into view.

pub mod app;
pub mod error;
pub mod event;
pub mod terminal;
pub mod ui;

use std::time::{Duration, Instant};

use crate::app::App;
use crate::error::Result;
use crate::terminal::Tui;

/// Runs the draw/event loop until the app stops running.
///
/// `pump` is called before every frame so the caller can feed new records
/// into the app. Timers advance on every iteration, so a steady stream of
/// input never starves them.
///
/// # Errors
///
/// Returns an error if drawing or reading terminal events fails.
pub fn run<F: FnMut(&mut App)>(
    tui: &mut Tui,
    app: &mut App,
    tick_rate: Duration,
    mut pump: F,
) -> Result<()> {
    while app.running {
        pump(app);
        let now = Instant::now();
        app.tick(now);
        let _ = tui.terminal().draw(|frame| ui::render(frame, app, now))?;
        let event = event::next_event(tick_rate)?;
        app.handle_event(event, Instant::now());
    }
    Ok(())
}
