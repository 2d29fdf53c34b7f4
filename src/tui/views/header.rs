//! Header rendering: gateway, gateway-wide totals and the view tabs

use crate::models::MetricsSnapshot;
use crate::store::ConsoleView;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the header
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    base_url: &str,
    view: ConsoleView,
    metrics: &MetricsSnapshot,
    loading: bool,
    theme: &Theme,
    no_icons: bool,
) {
    let mut title_line = vec![
        Span::styled(
            "gate9s",
            Style::default()
                .fg(theme.header_title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Gateway: "),
        Span::styled(base_url.to_string(), Style::default().fg(theme.header_gateway)),
        Span::raw(format!(
            "  Requests: {}  Errors: {}",
            metrics.total_requests(),
            metrics.total_errors()
        )),
    ];
    if loading {
        let indicator = if no_icons { "  [loading]" } else { "  ⟳ loading" };
        title_line.push(Span::styled(
            indicator,
            Style::default().fg(theme.header_loading),
        ));
    }

    let mut tabs = Vec::new();
    for (idx, tab) in ConsoleView::all().iter().enumerate() {
        if idx > 0 {
            tabs.push(Span::raw(" "));
        }
        tabs.push(Span::styled(
            format!(" {} {} ", idx + 1, tab.title()),
            theme.header_tab_style(*tab == view),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(title_line), Line::from(tabs)])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
