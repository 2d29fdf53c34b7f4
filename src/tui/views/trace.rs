//! Trace timeline rendering

use crate::trace::{TraceViewer, format_offset};
use crate::tui::theme::Theme;
use crate::tui::views::helpers::create_themed_block;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Render the trace overlay for the request being inspected
pub fn render_trace(f: &mut Frame, area: Rect, viewer: &TraceViewer, theme: &Theme) {
    let title = format!("Trace {}", viewer.request_id().unwrap_or("-"));
    let block = create_themed_block(title, theme);

    let lines: Vec<Line> = if viewer.is_loading() {
        vec![Line::from("Fetching trace events...")]
    } else if viewer.is_empty() {
        vec![
            Line::from("No events recorded for this request"),
            Line::from(""),
            Line::from(Span::styled("Esc to close", theme.label_style())),
        ]
    } else {
        let start = viewer.entries().iter().find_map(|e| e.created_at);
        viewer
            .entries()
            .iter()
            .map(|e| {
                let color = theme.trace_level_color(e.level);
                Line::from(vec![
                    Span::styled(
                        format!("{:<9}", format_offset(start, e.created_at)),
                        theme.label_style(),
                    ),
                    Span::styled(
                        format!("{:<6}", e.level.as_str()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<12}", e.component),
                        Style::default().fg(theme.text_secondary),
                    ),
                    Span::styled(e.message.clone(), Style::default().fg(color)),
                ])
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
