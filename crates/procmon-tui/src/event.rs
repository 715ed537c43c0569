//! Terminal event handling.
//!
//! Captures keyboard, mouse, and resize events from the terminal and
//! dispatches them to the application state machine.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::error::Result;

/// Terminal input events.
#[derive(Debug, Clone)]
pub enum TerminalEvent {
    /// A key was pressed.
    Key(crossterm::event::KeyEvent),
    /// The pointer moved, clicked, or scrolled.
    Mouse(crossterm::event::MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick for UI refresh.
    Tick,
}

/// Waits up to `timeout` for the next terminal event.
///
/// Returns [`TerminalEvent::Tick`] when nothing arrives in time, or when
/// the event is one the viewer ignores (key releases, focus, paste).
///
/// # Errors
///
/// Returns an error if polling or reading the terminal fails.
pub fn next_event(timeout: Duration) -> Result<TerminalEvent> {
    if !event::poll(timeout)? {
        return Ok(TerminalEvent::Tick);
    }
    Ok(match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => TerminalEvent::Key(key),
        Event::Mouse(mouse) => TerminalEvent::Mouse(mouse),
        Event::Resize(width, height) => TerminalEvent::Resize(width, height),
        _ => TerminalEvent::Tick,
    })
}
