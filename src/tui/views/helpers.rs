//! Common helper functions for view rendering

use crate::tui::theme::Theme;
use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render an empty state message
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    instructions: &str,
    theme: &Theme,
) {
    let text = vec![
        Line::from(message),
        Line::from(""),
        Line::from(instructions),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(paragraph, area);
}

/// Truncate a message to at most `max_len` characters, ending in "..."
pub fn truncate_message(message: &str, max_len: usize) -> String {
    if message.chars().count() > max_len {
        let kept: String = message.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        message.to_string()
    }
}

/// Create a block with title and borders using theme
pub fn create_themed_block<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_label))
}

/// Local-independent timestamp for table cells
pub fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Rectangle centered in `area` covering the given percentages
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Clear `area` so a popup does not show the table beneath it
pub fn clear_area(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);
}
