//! Footer rendering

use crate::tui::keybindings::NavigationCommand;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// What the footer shows, most specific first
pub enum FooterContent<'a> {
    /// Search text being typed
    Search(&'a str),
    /// Status message (message, is_error)
    Status(&'a str, bool),
    /// Key hints
    Commands(&'a [NavigationCommand]),
}

/// Render the footer
pub fn render_footer(f: &mut Frame, area: Rect, content: FooterContent<'_>, theme: &Theme) {
    let line = match content {
        FooterContent::Search(text) => Line::from(vec![
            Span::styled("/", theme.footer_key_style()),
            Span::raw(text.to_string()),
            Span::raw("_"), // Cursor
            Span::styled("  [Enter: apply, Esc: clear]", theme.label_style()),
        ]),
        FooterContent::Status(message, is_error) => Line::from(Span::styled(
            message.to_string(),
            if is_error {
                theme.operation_error_style()
            } else {
                theme.operation_success_style()
            },
        )),
        FooterContent::Commands(commands) => command_line(commands, theme),
    };

    let footer = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn command_line<'a>(commands: &[NavigationCommand], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();
    for (idx, cmd) in commands.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(cmd.key, theme.footer_key_style()));
        spans.push(Span::raw(format!(" {}", cmd.label)));
    }
    Line::from(spans)
}
