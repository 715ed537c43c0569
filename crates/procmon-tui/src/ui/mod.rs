//! UI rendering modules.
//!
//! [`render`] lays out one frame: a status bar, the event list, the detail
//! pane of the selected record, and a key hint footer.

pub mod decoration;
pub mod detail;
pub mod follow;
pub mod hover;
pub mod message_list;
pub mod summary;

use std::time::Instant;

use procmon_common::constants::APP_NAME;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

const DETAIL_HEIGHT: u16 = 8;
const KEY_HINTS: &str = "q quit  f follow  s severe-only  ↑↓ move  Enter select  wheel scroll";

/// Renders a full frame.
pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let detail_height = if app.selected().is_some() { DETAIL_HEIGHT } else { 0 };
    let [status, list, detail, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(detail_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new(status_line(app)), status);

    let (widget, state) = app.message_list(now);
    let widget = widget.block(Block::default().borders(Borders::ALL).title(" Events "));
    frame.render_stateful_widget(widget, list, state);

    if let Some(record) = app.selected() {
        detail::render_detail(frame, detail, record, app.instances());
    }

    frame.render_widget(
        Paragraph::new(KEY_HINTS).style(Style::new().fg(Color::DarkGray)),
        footer,
    );
}

fn status_line(app: &App) -> Line<'_> {
    let mut spans = vec![
        Span::styled(APP_NAME, Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "  {} events, {} shown",
            app.total(),
            app.visible().len()
        )),
    ];
    if app.following {
        spans.push(Span::styled(" [FOLLOW]", Style::new().fg(Color::Green)));
    }
    if app.filter().severe_only {
        spans.push(Span::styled(" [severe only]", Style::new().fg(Color::Red)));
    }
    if let Some(tag) = &app.filter().type_tag {
        spans.push(Span::raw(format!(" [type={tag}]")));
    }
    if let Some(status) = app.status() {
        spans.push(Span::styled(format!("  {status}"), Style::new().fg(Color::Yellow)));
    }
    Line::from(spans)
}
