//! Live event list.
//!
//! [`MessageList`] is rebuilt from the caller's props on every frame and
//! renders into a [`MessageListState`], which keeps only what must survive
//! between frames: the mount flag, the follow timer, hover tracking, the
//! scroll offset, and the row layout of the last frame for hit-testing.

use std::time::Instant;

use procmon_common::config::ViewerConfig;
use procmon_common::constants::{COLUMN_COUNT, EMPTY_MESSAGE};
use procmon_common::types::{InstanceDirectory, Record, Summary};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap};

use super::decoration;
use super::follow::{FilterToken, FollowDeps, FollowEffect, SequenceIdentity};
use super::hover::Hover;
use super::summary::render_summary;

const HEADERS: [&str; COLUMN_COUNT] = ["ID", "Time", "Process", "Type", "Summary"];
const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const SEVERE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Red);
const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
const OWNER_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const PLACEHOLDER_STYLE: Style = Style::new().fg(Color::DarkGray);
const PLACEHOLDER_GLYPHS: [&str; 2] = ["░", "▒"];
const PLACEHOLDER_PHASE_MS: u128 = 500;
const TOOLTIP_MAX_WIDTH: u16 = 60;
const TOOLTIP_MAX_LINES: u16 = 6;

/// Presentation lifecycle of the list, derived from the props on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportState {
    /// Not yet mounted, or the caller reports a load in flight.
    Loading,
    /// At least one record to show.
    Populated,
    /// Loaded, but nothing to show.
    Empty,
}

impl ViewportState {
    /// Derives the state from the current inputs. No hysteresis.
    #[must_use]
    pub fn derive(mounted: bool, loading: bool, messages: Option<&[Record]>) -> Self {
        if !mounted || loading {
            return Self::Loading;
        }
        match messages {
            Some(records) if !records.is_empty() => Self::Populated,
            _ => Self::Empty,
        }
    }
}

/// Something under the pointer that carries a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// Owner badge of the row at this position.
    Owner {
        /// Row position in the provided sequence.
        row: usize,
    },
    /// Summary chip of the row at this position.
    Chip {
        /// Row position in the provided sequence.
        row: usize,
        /// Field index within the summary.
        field: usize,
    },
}

/// Screen geometry of one rendered data row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowLayout {
    position: usize,
    y: u16,
    owner: Rect,
    chips: Vec<(Rect, usize)>,
}

/// Props of the event list, supplied whole on every frame.
#[derive(Debug, Clone)]
pub struct MessageList<'a> {
    messages: Option<&'a [Record]>,
    instances: &'a InstanceDirectory,
    loading: bool,
    following: bool,
    filters: FilterToken,
    now: Instant,
    block: Option<Block<'a>>,
}

impl<'a> MessageList<'a> {
    /// Creates the list over the given records and instance directory.
    #[must_use]
    pub fn new(messages: Option<&'a [Record]>, instances: &'a InstanceDirectory) -> Self {
        Self {
            messages,
            instances,
            loading: false,
            following: false,
            filters: FilterToken::default(),
            now: Instant::now(),
            block: None,
        }
    }

    /// Whether an external load is in progress.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Whether to keep the newest row in view.
    #[must_use]
    pub const fn following(mut self, following: bool) -> Self {
        self.following = following;
        self
    }

    /// Fingerprint of the caller's filter criteria.
    #[must_use]
    pub const fn filters(mut self, filters: FilterToken) -> Self {
        self.filters = filters;
        self
    }

    /// Frame time used for timers and animation.
    #[must_use]
    pub const fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }

    /// Wraps the list in a block.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_header(columns: &[Rect; COLUMN_COUNT], y: u16, buf: &mut Buffer) {
        for (rect, title) in columns.iter().zip(HEADERS) {
            let _ = buf.set_stringn(rect.x, y, title, usize::from(rect.width), HEADER_STYLE);
        }
    }

    fn render_placeholders(
        columns: &[Rect; COLUMN_COUNT],
        body: Rect,
        rows: usize,
        glyph: &str,
        buf: &mut Buffer,
    ) {
        let cell = |rect: &Rect| glyph.repeat(usize::from(rect.width));
        for y in (body.y..body.bottom()).take(rows) {
            for rect in columns {
                let _ = buf.set_stringn(
                    rect.x,
                    y,
                    cell(rect),
                    usize::from(rect.width),
                    PLACEHOLDER_STYLE,
                );
            }
        }
    }

    fn render_empty(body: Rect, buf: &mut Buffer) {
        if body.height == 0 {
            return;
        }
        let line = Rect { height: 1, ..body };
        Paragraph::new(EMPTY_MESSAGE)
            .alignment(Alignment::Center)
            .render(line, buf);
    }

    fn render_rows(
        &self,
        records: &[Record],
        columns: &[Rect; COLUMN_COUNT],
        body: Rect,
        state: &mut MessageListState,
        buf: &mut Buffer,
    ) {
        let [ordinal, time, owner, kind, summary] = *columns;
        let end = records.len().min(state.offset + usize::from(body.height));
        for (position, record) in records.iter().enumerate().take(end).skip(state.offset) {
            let y = body.y + u16::try_from(position - state.offset).unwrap_or(u16::MAX);
            let row_rect = Rect::new(body.x, y, body.width, 1);
            let mut row_style = Style::default();
            if record.severe {
                row_style = row_style.patch(SEVERE_STYLE);
            }
            if state.cursor == Some(position) {
                row_style = row_style.patch(CURSOR_STYLE);
            }
            buf.set_style(row_rect, row_style);

            let _ = buf.set_stringn(
                ordinal.x,
                y,
                position.to_string(),
                usize::from(ordinal.width),
                Style::default(),
            );
            let _ = buf.set_stringn(
                time.x,
                y,
                &record.timestamp,
                usize::from(time.width),
                Style::default(),
            );

            let badge = Span::styled(format!(" {} ", record.owner_id), OWNER_STYLE);
            let (badge_end, _) = buf.set_span(owner.x, y, &badge, owner.width);
            let owner_hit = Rect::new(owner.x, y, badge_end.saturating_sub(owner.x), 1);

            let tag = decoration::resolve(&record.type_tag).span();
            let _ = buf.set_span(kind.x, y, &tag, kind.width);

            let rendered = render_summary(&record.summary);
            let _ = buf.set_line(summary.x, y, &rendered.line, summary.width);
            let chips = rendered
                .chips
                .iter()
                .filter(|chip| chip.offset < summary.width)
                .map(|chip| {
                    let width = chip.width.min(summary.width - chip.offset);
                    (Rect::new(summary.x + chip.offset, y, width, 1), chip.field)
                })
                .collect();

            state.layout.push(RowLayout {
                position,
                y,
                owner: owner_hit,
                chips,
            });
        }
    }

    fn tooltip_text(&self, target: HoverTarget) -> Option<&'a str> {
        let records = self.messages?;
        let text = match target {
            HoverTarget::Owner { row } => self.instances.describe(records.get(row)?.owner_id)?,
            HoverTarget::Chip { row, field } => match &records.get(row)?.summary {
                Summary::Fields(fields) => fields.get(field)?.tooltip.as_str(),
                Summary::Text(_) => return None,
            },
        };
        (!text.is_empty()).then_some(text)
    }

    fn render_tooltip(&self, area: Rect, state: &MessageListState, buf: &mut Buffer) {
        let Some(target) = state.hover.visible().copied() else {
            return;
        };
        let Some(text) = self.tooltip_text(target) else {
            return;
        };
        let Some(anchor) = state.anchor_of(target) else {
            return;
        };

        let text_width = u16::try_from(Line::raw(text).width()).unwrap_or(u16::MAX);
        let width = text_width.saturating_add(2).min(TOOLTIP_MAX_WIDTH).min(area.width);
        if width < 3 {
            return;
        }
        let inner_width = width - 2;
        let lines = text_width.div_ceil(inner_width).clamp(1, TOOLTIP_MAX_LINES);
        let height = (lines + 2).min(area.height);

        // Owner tooltips open above the badge, chip tooltips below.
        let y = match target {
            HoverTarget::Owner { .. } if anchor.y >= area.y + height => anchor.y - height,
            _ if anchor.bottom() + height <= area.bottom() => anchor.bottom(),
            _ => area.bottom().saturating_sub(height),
        };
        let x = anchor.x.min(area.right().saturating_sub(width));
        let popup = Rect::new(x, y, width, height);

        Clear.render(popup, buf);
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL))
            .render(popup, buf);
    }
}

fn columns(area: Rect) -> [Rect; COLUMN_COUNT] {
    Layout::horizontal([
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(18),
        Constraint::Min(10),
    ])
    .spacing(1)
    .areas(area)
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let area = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        state.layout.clear();

        let viewport = ViewportState::derive(state.mounted, self.loading, self.messages);
        if viewport != state.viewport {
            tracing::debug!(from = ?state.viewport, to = ?viewport, "viewport state changed");
            state.viewport = viewport;
        }
        let _ = state.follow.sync(
            FollowDeps {
                following: self.following,
                sequence: SequenceIdentity::of(self.messages),
                filters: self.filters,
                mounted: state.mounted,
                loading: self.loading,
            },
            self.now,
        );

        if area.height > 0 && area.width > 0 {
            let header = Rect { height: 1, ..area };
            let body = Rect {
                y: area.y + 1,
                height: area.height - 1,
                ..area
            };
            let columns = columns(header);
            Self::render_header(&columns, header.y, buf);
            state.body = body;

            match (viewport, self.messages) {
                (ViewportState::Populated, Some(records)) => {
                    state.settle_offset(records.len(), body.height);
                    self.render_rows(records, &columns, body, state, buf);
                    state.rehover(self.now);
                    self.render_tooltip(area, state, buf);
                }
                (ViewportState::Loading, _) => {
                    state.reset_scroll();
                    state.rehover(self.now);
                    let glyph = state.placeholder_glyph(self.now);
                    Self::render_placeholders(
                        &columns,
                        body,
                        state.placeholder_rows,
                        glyph,
                        buf,
                    );
                }
                _ => {
                    state.reset_scroll();
                    state.rehover(self.now);
                    Self::render_empty(body, buf);
                }
            }
            state.follow.attach();
        }

        if !state.mounted {
            state.mounted = true;
            state.mounted_at = Some(self.now);
            tracing::debug!("message list mounted");
        }
    }
}

/// Retained state of the event list.
#[derive(Debug, Clone)]
pub struct MessageListState {
    mounted: bool,
    mounted_at: Option<Instant>,
    viewport: ViewportState,
    follow: FollowEffect,
    hover: Hover<HoverTarget>,
    pointer: Option<(u16, u16)>,
    placeholder_rows: usize,
    offset: usize,
    scrolling: bool,
    cursor: Option<usize>,
    body: Rect,
    layout: Vec<RowLayout>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl MessageListState {
    /// Creates unmounted state using the configured timings.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            mounted: false,
            mounted_at: None,
            viewport: ViewportState::Loading,
            follow: FollowEffect::new(config.follow_delay()),
            hover: Hover::new(config.hover_show(), config.hover_hide()),
            pointer: None,
            placeholder_rows: config.placeholder_rows,
            offset: 0,
            scrolling: false,
            cursor: None,
            body: Rect::default(),
            layout: Vec::new(),
        }
    }

    /// Advances hover and follow timers.
    pub fn tick(&mut self, now: Instant) {
        self.hover.tick(now);
        if self.follow.poll(now) {
            self.scrolling = true;
        }
    }

    /// Tears the list down: cancels the pending follow scroll, drops hover
    /// state, and returns to the pre-mount state.
    pub fn unmount(&mut self) {
        self.follow.cancel();
        self.hover.reset();
        self.pointer = None;
        self.mounted = false;
        self.mounted_at = None;
        self.viewport = ViewportState::Loading;
        self.scrolling = false;
        self.layout.clear();
        tracing::debug!("message list unmounted");
    }

    /// Feeds a pointer position to hover tracking.
    pub fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) {
        self.pointer = Some((column, row));
        self.rehover(now);
    }

    /// Re-resolves the hover target under a resting pointer after the rows
    /// beneath it moved.
    fn rehover(&mut self, now: Instant) {
        if let Some((column, row)) = self.pointer {
            let target = self.hit_test(column, row);
            self.hover.pointer_at(target, now);
        }
    }

    /// Activates the row under a click. Returns `true` if a row was hit.
    ///
    /// The callback, when given, receives the full record.
    pub fn click(
        &mut self,
        column: u16,
        row: u16,
        messages: &[Record],
        on_select: Option<&mut dyn FnMut(&Record)>,
    ) -> bool {
        let Some(position) = self.row_at(column, row) else {
            return false;
        };
        self.cursor = Some(position);
        Self::select(messages, position, on_select)
    }

    /// Activates the row under the keyboard cursor.
    pub fn activate_cursor(
        &self,
        messages: &[Record],
        on_select: Option<&mut dyn FnMut(&Record)>,
    ) -> bool {
        self.cursor
            .is_some_and(|position| Self::select(messages, position, on_select))
    }

    fn select(
        messages: &[Record],
        position: usize,
        on_select: Option<&mut dyn FnMut(&Record)>,
    ) -> bool {
        let Some(record) = messages.get(position) else {
            return false;
        };
        if let Some(callback) = on_select {
            callback(record);
        }
        true
    }

    /// Moves the keyboard cursor, keeping it inside the visible rows.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = None;
            return;
        }
        let current = self.cursor.unwrap_or(self.offset);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.cursor = Some(next);
        self.scrolling = false;

        let visible = usize::from(self.body.height).max(1);
        if next < self.offset {
            self.offset = next;
        } else if next >= self.offset + visible {
            self.offset = next + 1 - visible;
        }
    }

    /// Scrolls manually. Stops any follow scroll in progress.
    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.scrolling = false;
    }

    /// Current lifecycle state, as of the last render.
    #[must_use]
    pub const fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Whether the first render has completed.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Index of the first visible row.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Keyboard cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of follow scrolls fired so far.
    #[must_use]
    pub const fn scrolls_fired(&self) -> u64 {
        self.follow.fired()
    }

    /// Whether a follow scroll is scheduled.
    #[must_use]
    pub const fn follow_pending(&self) -> bool {
        self.follow.is_pending()
    }

    /// Whether a smooth scroll toward the end is in progress.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Target whose tooltip is visible.
    #[must_use]
    pub const fn hovered(&self) -> Option<&HoverTarget> {
        self.hover.visible()
    }

    fn hit_test(&self, column: u16, row: u16) -> Option<HoverTarget> {
        let layout = self.layout.iter().find(|l| l.y == row)?;
        if contains(layout.owner, column, row) {
            return Some(HoverTarget::Owner { row: layout.position });
        }
        layout
            .chips
            .iter()
            .find(|(rect, _)| contains(*rect, column, row))
            .map(|&(_, field)| HoverTarget::Chip {
                row: layout.position,
                field,
            })
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        if !contains(self.body, column, row) {
            return None;
        }
        self.layout.iter().find(|l| l.y == row).map(|l| l.position)
    }

    fn anchor_of(&self, target: HoverTarget) -> Option<Rect> {
        match target {
            HoverTarget::Owner { row } => {
                self.layout.iter().find(|l| l.position == row).map(|l| l.owner)
            }
            HoverTarget::Chip { row, field } => self
                .layout
                .iter()
                .find(|l| l.position == row)?
                .chips
                .iter()
                .find(|(_, f)| *f == field)
                .map(|(rect, _)| *rect),
        }
    }

    /// Clamps the offset and advances the smooth follow scroll by one frame,
    /// halving the remaining distance to the bottom-most offset.
    fn settle_offset(&mut self, total: usize, height: u16) {
        let max_offset = total.saturating_sub(usize::from(height));
        if self.scrolling {
            let remaining = max_offset.saturating_sub(self.offset);
            self.offset += remaining.div_ceil(2);
            if self.offset >= max_offset {
                self.scrolling = false;
            }
        }
        self.offset = self.offset.min(max_offset);
        if self.cursor.is_some_and(|c| c >= total) {
            self.cursor = total.checked_sub(1);
        }
    }

    fn reset_scroll(&mut self) {
        self.offset = 0;
        self.scrolling = false;
    }

    fn placeholder_glyph(&self, now: Instant) -> &'static str {
        let elapsed = self
            .mounted_at
            .map_or(0, |at| now.saturating_duration_since(at).as_millis());
        let phase = usize::from(elapsed / PLACEHOLDER_PHASE_MS % 2 == 1);
        PLACEHOLDER_GLYPHS[phase]
    }
}

const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(i: u64) -> Record {
        Record::new(i, "10:00:00", 1, "send", Summary::default())
    }

    #[test]
    fn premount_is_loading_regardless_of_inputs() {
        let records = vec![record(0)];
        assert_eq!(
            ViewportState::derive(false, false, Some(records.as_slice())),
            ViewportState::Loading
        );
        assert_eq!(ViewportState::derive(false, false, None), ViewportState::Loading);
    }

    #[test]
    fn loading_flag_wins_after_mount() {
        let records = vec![record(0)];
        assert_eq!(
            ViewportState::derive(true, true, Some(records.as_slice())),
            ViewportState::Loading
        );
    }

    #[test]
    fn populated_iff_non_empty() {
        let records = vec![record(0), record(1)];
        assert_eq!(
            ViewportState::derive(true, false, Some(records.as_slice())),
            ViewportState::Populated
        );
        assert_eq!(ViewportState::derive(true, false, Some(&[][..])), ViewportState::Empty);
        assert_eq!(ViewportState::derive(true, false, None), ViewportState::Empty);
    }

    #[test]
    fn smooth_scroll_halves_remaining_distance() {
        let mut state = MessageListState::default();
        state.scrolling = true;
        state.settle_offset(100, 20);
        assert_eq!(state.offset, 40);
        state.settle_offset(100, 20);
        assert_eq!(state.offset, 60);
        for _ in 0..10 {
            state.settle_offset(100, 20);
        }
        assert_eq!(state.offset, 80);
        assert!(!state.scrolling);
    }

    #[test]
    fn offset_is_clamped_when_rows_fit() {
        let mut state = MessageListState::default();
        state.scroll_by(50);
        state.settle_offset(5, 20);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn cursor_movement_keeps_row_visible() {
        let mut state = MessageListState::default();
        state.body = Rect::new(0, 1, 80, 5);
        state.move_cursor(7, 20);
        assert_eq!(state.cursor, Some(7));
        assert_eq!(state.offset, 3);
        state.move_cursor(-10, 20);
        assert_eq!(state.cursor, Some(0));
        assert_eq!(state.offset, 0);
        state.move_cursor(100, 20);
        assert_eq!(state.cursor, Some(19));
    }

    #[test]
    fn cursor_on_empty_list_is_cleared() {
        let mut state = MessageListState::default();
        state.move_cursor(1, 0);
        assert_eq!(state.cursor, None);
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2, 3, 4, 1);
        assert!(contains(rect, 2, 3));
        assert!(contains(rect, 5, 3));
        assert!(!contains(rect, 6, 3));
        assert!(!contains(rect, 2, 4));
    }
}
