//! Resource form rendering
//!
//! Shows every field of the open draft with the focused one highlighted.
//! Choice fields are drawn with arrows to hint that Left/Right cycles them.

use crate::crud::CrudController;
use crate::models::Service;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the form popup; draws nothing when no form is open
pub fn render_form(
    f: &mut Frame,
    area: Rect,
    crud: &CrudController,
    focus: usize,
    services: &[Service],
    theme: &Theme,
) {
    let Some(session) = crud.session() else {
        return;
    };
    let draft = &session.draft;
    let submitting = crud.is_submitting();

    let mut lines = Vec::new();
    for (idx, field) in draft.fields().iter().enumerate() {
        let focused = idx == focus && !submitting;
        let value = draft.value(*field, services);
        let shown = if field.is_choice() {
            format!("< {} >", value)
        } else if focused {
            format!("{}_", value)
        } else {
            value
        };

        let label_style = if focused {
            Style::default()
                .fg(theme.form_focus)
                .add_modifier(Modifier::BOLD)
        } else {
            theme.label_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>16}: ", field.label()), label_style),
            Span::styled(shown, Style::default().fg(theme.text_value)),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(error) = &session.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.form_error),
        )));
    }
    if submitting {
        lines.push(Line::from(Span::styled(
            "Saving...",
            theme.operation_warning_style(),
        )));
    }

    let title = format!(
        "{} {}",
        if draft.is_new() { "New" } else { "Edit" },
        draft.kind().display_name()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.form_focus));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
