//! Summary rendering.
//!
//! Text summaries are shown as they are. Structured summaries become one
//! chip per field, `key:` on a light badge followed by the value on an info
//! pill. Chip positions are reported back so the list can hit-test the
//! pointer and reveal the field's tooltip.

use std::borrow::Cow;

use procmon_common::types::Summary;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEY_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);
const VALUE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Horizontal extent of one chip within the rendered summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSpan {
    /// Index of the field in the summary.
    pub field: usize,
    /// Column offset from the start of the summary cell.
    pub offset: u16,
    /// Width in cells.
    pub width: u16,
}

/// A summary ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSummary<'a> {
    /// The content line.
    pub line: Line<'a>,
    /// Chip extents, in field order. Empty for text summaries.
    pub chips: Vec<ChipSpan>,
}

/// Renders a record summary.
#[must_use]
pub fn render_summary(summary: &Summary) -> RenderedSummary<'_> {
    match summary {
        Summary::Text(text) => RenderedSummary {
            line: Line::from(Span::raw(single_line(text))),
            chips: Vec::new(),
        },
        Summary::Fields(fields) => {
            let mut spans = Vec::with_capacity(fields.len() * 3);
            let mut chips = Vec::with_capacity(fields.len());
            let mut offset = 0_usize;
            for (field, entry) in fields.iter().enumerate() {
                let key = Span::styled(format!(" {}:", single_line(&entry.key)), KEY_STYLE);
                let value = Span::styled(format!(" {} ", single_line(&entry.value)), VALUE_STYLE);
                let width = key.width() + value.width();
                chips.push(ChipSpan {
                    field,
                    offset: saturate(offset),
                    width: saturate(width),
                });
                spans.extend([key, value, Span::raw(" ")]);
                offset += width + 1;
            }
            RenderedSummary {
                line: Line::from(spans),
                chips,
            }
        }
    }
}

/// Control characters would break the row grid.
fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(char::is_control) {
        Cow::Owned(text.replace(char::is_control, " "))
    } else {
        Cow::Borrowed(text)
    }
}

fn saturate(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
