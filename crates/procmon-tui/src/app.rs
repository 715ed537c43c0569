//! TUI application state.
//!
//! Owns the record stream and instance directory on behalf of the event
//! list, applies the shell's filters upstream of it, and turns terminal
//! events into state changes.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use procmon_common::config::ViewerConfig;
use procmon_common::types::{InstanceDirectory, Record};

use crate::event::TerminalEvent;
use crate::ui::follow::FilterToken;
use crate::ui::message_list::{MessageList, MessageListState};

const PAGE: isize = 10;
const WHEEL_STEP: isize = 3;

/// Filter criteria applied before records reach the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordFilter {
    /// Keep only records with this exact type tag.
    pub type_tag: Option<String>,
    /// Keep only severe records.
    pub severe_only: bool,
}

impl RecordFilter {
    /// Returns `true` if the record passes the filter.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        (!self.severe_only || record.severe)
            && self.type_tag.as_deref().is_none_or(|tag| record.type_tag == tag)
    }
}

/// Root application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the app should continue running.
    pub running: bool,
    /// Whether the feed reports a load in flight.
    pub loading: bool,
    /// Whether the list follows the newest record.
    pub following: bool,
    records: Vec<Record>,
    visible: Vec<Record>,
    instances: InstanceDirectory,
    filter: RecordFilter,
    selected: Option<Record>,
    status: Option<String>,
    list: MessageListState,
}

impl App {
    /// Creates the application state. Starts in the loading state until
    /// the first feed update arrives.
    #[must_use]
    pub fn new(config: &ViewerConfig, filter: RecordFilter) -> Self {
        Self {
            running: true,
            loading: true,
            following: config.follow,
            records: Vec::new(),
            visible: Vec::new(),
            instances: InstanceDirectory::new(),
            filter,
            selected: None,
            status: None,
            list: MessageListState::new(config),
        }
    }

    /// Signals the app to quit and tears the list down.
    pub fn quit(&mut self) {
        self.running = false;
        self.list.unmount();
    }

    /// Replaces the record stream.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refilter();
    }

    /// Replaces the instance directory.
    pub fn set_instances(&mut self, instances: InstanceDirectory) {
        self.instances = instances;
    }

    /// Sets or clears the status bar message.
    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    /// Toggles follow mode.
    pub fn toggle_follow(&mut self) {
        self.following = !self.following;
        tracing::debug!(following = self.following, "follow toggled");
    }

    /// Toggles the severe-only filter.
    pub fn toggle_severe_only(&mut self) {
        self.filter.severe_only = !self.filter.severe_only;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self
            .records
            .iter()
            .filter(|r| self.filter.matches(r))
            .cloned()
            .collect();
    }

    /// Records that pass the filter, in stream order.
    #[must_use]
    pub fn visible(&self) -> &[Record] {
        &self.visible
    }

    /// Number of records in the unfiltered stream.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Instance directory.
    #[must_use]
    pub const fn instances(&self) -> &InstanceDirectory {
        &self.instances
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Record chosen by click or Enter.
    #[must_use]
    pub const fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    /// Status bar message.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Retained list state.
    #[must_use]
    pub const fn list(&self) -> &MessageListState {
        &self.list
    }

    /// Builds this frame's list props together with the state they render into.
    pub fn message_list(&mut self, now: Instant) -> (MessageList<'_>, &mut MessageListState) {
        let widget = MessageList::new(Some(self.visible.as_slice()), &self.instances)
            .loading(self.loading)
            .following(self.following)
            .filters(FilterToken::of(&self.filter))
            .at(now);
        (widget, &mut self.list)
    }

    /// Advances the list's hover and follow timers. Runs once per loop
    /// iteration whatever event arrived.
    pub fn tick(&mut self, now: Instant) {
        self.list.tick(now);
    }

    /// Applies one terminal event.
    pub fn handle_event(&mut self, event: TerminalEvent, now: Instant) {
        match event {
            TerminalEvent::Key(key) => self.handle_key(key),
            TerminalEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
            TerminalEvent::Tick | TerminalEvent::Resize(..) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Esc if self.selected.is_some() => self.selected = None,
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('f') => self.toggle_follow(),
            KeyCode::Char('s') => self.toggle_severe_only(),
            KeyCode::Up => self.navigate(-1),
            KeyCode::Down => self.navigate(1),
            KeyCode::PageUp => self.navigate(-PAGE),
            KeyCode::PageDown => self.navigate(PAGE),
            KeyCode::Enter => {
                let mut chosen = None;
                let _ = self.list.activate_cursor(
                    &self.visible,
                    Some(&mut |r: &Record| chosen = Some(r.clone())),
                );
                if chosen.is_some() {
                    self.selected = chosen;
                }
            }
            _ => {}
        }
    }

    /// Manual navigation takes over from follow mode.
    fn navigate(&mut self, delta: isize) {
        self.following = false;
        self.list.move_cursor(delta, self.visible.len());
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Moved => self.list.pointer_moved(mouse.column, mouse.row, now),
            MouseEventKind::Down(MouseButton::Left) => {
                let mut chosen = None;
                let _ = self.list.click(
                    mouse.column,
                    mouse.row,
                    &self.visible,
                    Some(&mut |r: &Record| chosen = Some(r.clone())),
                );
                if chosen.is_some() {
                    self.selected = chosen;
                }
            }
            MouseEventKind::ScrollUp => {
                self.following = false;
                self.list.scroll_by(-WHEEL_STEP);
            }
            MouseEventKind::ScrollDown => self.list.scroll_by(WHEEL_STEP),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyEventKind;
    use procmon_common::types::Summary;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::StatefulWidget;

    use super::*;

    fn record(i: u64, tag: &str, severe: bool) -> Record {
        Record::new(i, "10:00:00", 1, tag, Summary::default()).severe(severe)
    }

    fn key(code: KeyCode) -> TerminalEvent {
        TerminalEvent::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press))
    }

    fn app() -> App {
        let mut app = App::new(&ViewerConfig::default(), RecordFilter::default());
        app.replace_records(vec![
            record(0, "spawn", false),
            record(1, "send", true),
            record(2, "recv", false),
        ]);
        app
    }

    #[test]
    fn filter_by_type_and_severity() {
        let filter = RecordFilter {
            type_tag: Some("send".into()),
            severe_only: true,
        };
        assert!(filter.matches(&record(0, "send", true)));
        assert!(!filter.matches(&record(0, "send", false)));
        assert!(!filter.matches(&record(0, "recv", true)));
        assert!(RecordFilter::default().matches(&record(0, "x", false)));
    }

    #[test]
    fn severe_toggle_refilters() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('s')), Instant::now());
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.total(), 3);
        app.handle_event(key(KeyCode::Char('s')), Instant::now());
        assert_eq!(app.visible().len(), 3);
    }

    #[test]
    fn follow_toggle_and_navigation() {
        let mut app = app();
        assert!(app.following);
        app.handle_event(key(KeyCode::Char('f')), Instant::now());
        assert!(!app.following);
        app.following = true;
        app.handle_event(key(KeyCode::Down), Instant::now());
        assert!(!app.following);
        assert_eq!(app.list().cursor(), Some(1));
    }

    #[test]
    fn enter_selects_cursor_row_and_esc_closes() {
        let mut app = app();
        app.handle_event(key(KeyCode::Down), Instant::now());
        app.handle_event(key(KeyCode::Enter), Instant::now());
        assert_eq!(app.selected().map(|r| r.sequence_index), Some(1));
        app.handle_event(key(KeyCode::Esc), Instant::now());
        assert!(app.selected().is_none());
        assert!(app.running);
        app.handle_event(key(KeyCode::Esc), Instant::now());
        assert!(!app.running);
    }

    #[test]
    fn follow_fires_while_mouse_keeps_moving() {
        let area = Rect::new(0, 0, 100, 20);
        let mut app = App::new(&ViewerConfig::default(), RecordFilter::default());
        app.replace_records((0..50).map(|i| record(i, "send", false)).collect());
        app.loading = false;

        let t0 = Instant::now();
        for frame in 0..40 {
            let now = t0 + Duration::from_millis(frame * 50);
            app.tick(now);
            let mut buf = Buffer::empty(area);
            let (widget, state) = app.message_list(now);
            widget.render(area, &mut buf, state);
            let moved = MouseEvent {
                kind: MouseEventKind::Moved,
                column: u16::try_from(frame).unwrap_or(0),
                row: 0,
                modifiers: KeyModifiers::NONE,
            };
            app.handle_event(TerminalEvent::Mouse(moved), now);
        }

        assert_eq!(app.list().scrolls_fired(), 1);
        assert!(!app.list().follow_pending());
        assert_eq!(app.list().offset(), 50 - 19);
    }

    #[test]
    fn quit_unmounts_list() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')), Instant::now());
        assert!(!app.running);
        assert!(!app.list().is_mounted());
    }
}
