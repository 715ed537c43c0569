//! Detail pane for the selected record.

use procmon_common::types::{InstanceDirectory, Record, Summary};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::decoration;

const LABEL_STYLE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::BOLD);

/// Builds the lines describing a record: header fields, then one line per
/// summary field with its tooltip.
#[must_use]
pub fn detail_lines<'a>(record: &'a Record, instances: &'a InstanceDirectory) -> Vec<Line<'a>> {
    let owner = instances.describe(record.owner_id).map_or_else(
        || record.owner_id.to_string(),
        |desc| format!("{} - {desc}", record.owner_id),
    );
    let mut lines = vec![
        Line::from(vec![
            Span::styled("index ", LABEL_STYLE),
            Span::raw(record.sequence_index.to_string()),
            Span::styled("  time ", LABEL_STYLE),
            Span::raw(record.timestamp.as_str()),
            Span::styled("  type ", LABEL_STYLE),
            decoration::resolve(&record.type_tag).span(),
        ]),
        Line::from(vec![Span::styled("process ", LABEL_STYLE), Span::raw(owner)]),
    ];
    match &record.summary {
        Summary::Text(text) => lines.push(Line::raw(text.as_str())),
        Summary::Fields(fields) => lines.extend(fields.iter().map(|field| {
            Line::from(vec![
                Span::styled(format!("{}: ", field.key), LABEL_STYLE),
                Span::raw(field.value.as_str()),
                Span::styled(format!("  {}", field.tooltip), Style::new().fg(Color::DarkGray)),
            ])
        })),
    }
    lines
}

/// Renders the detail pane.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    record: &Record,
    instances: &InstanceDirectory,
) {
    let style = if record.severe {
        Style::new().fg(Color::Red)
    } else {
        Style::new()
    };
    let pane = Paragraph::new(detail_lines(record, instances))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Selected (Esc to close) "),
        );
    frame.render_widget(pane, area);
}

#[cfg(test)]
mod tests {
    use procmon_common::types::SummaryField;

    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn owner_line_uses_directory() {
        let mut instances = InstanceDirectory::new();
        instances.insert(42, "notepad.exe");
        let record = Record::new(5, "10:00:01", 42, "spawn", Summary::Text("created".into()));

        let lines = detail_lines(&record, &instances);
        assert_eq!(text(&lines[1]), "process 42 - notepad.exe");
        assert_eq!(text(&lines[2]), "created");
    }

    #[test]
    fn fields_list_tooltips() {
        let record = Record::new(
            0,
            "",
            7,
            "ReadFile",
            Summary::Fields(vec![SummaryField::new("n", "16", "bytes requested")]),
        );
        let instances = InstanceDirectory::new();
        let lines = detail_lines(&record, &instances);
        assert_eq!(text(&lines[1]), "process 7");
        assert_eq!(text(&lines[2]), "n: 16  bytes requested");
    }
}
