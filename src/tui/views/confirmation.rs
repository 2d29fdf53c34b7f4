//! Confirmation dialog rendering

use crate::crud::DeleteTarget;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the delete confirmation dialog
pub fn render_confirmation(f: &mut Frame, area: Rect, target: &DeleteTarget, theme: &Theme) {
    let confirm = Style::default()
        .fg(theme.operation_confirm)
        .add_modifier(Modifier::BOLD);
    let cancel = Style::default()
        .fg(theme.operation_cancel)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CONFIRMATION REQUIRED",
            theme.operation_warning_style(),
        )),
        Line::from(""),
        Line::from(target.prompt()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("y", confirm),
            Span::raw(" to delete, "),
            Span::styled("n", cancel),
            Span::raw(" or "),
            Span::styled("Esc", cancel),
            Span::raw(" to cancel"),
        ]),
    ];

    let block = Block::default()
        .title("Confirm Delete")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.operation_warning));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
