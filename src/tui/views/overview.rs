//! Overview: resource counts, per-service health and recent activity

use crate::listing::ViewState;
use crate::models::ActivityLogEntry;
use crate::store::Collections;
use crate::tui::constants::OVERVIEW_ACTIVITY_ROWS;
use crate::tui::theme::Theme;
use crate::tui::views::tables::render_activity;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn render_overview(
    f: &mut Frame,
    area: Rect,
    data: &Collections,
    activity: &ViewState<ActivityLogEntry>,
    selected: usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Min(OVERVIEW_ACTIVITY_ROWS + 3),
        ])
        .split(area);

    render_summary(f, chunks[0], data, theme);
    render_service_health(f, chunks[1], data, theme);
    render_activity(f, chunks[2], activity, &data.activity_log, selected, theme);
}

fn render_summary(f: &mut Frame, area: Rect, data: &Collections, theme: &Theme) {
    let label = theme.label_style();
    let value = Style::default()
        .fg(theme.text_value)
        .add_modifier(Modifier::BOLD);
    let metrics = &data.metrics;

    let line = Line::from(vec![
        Span::styled("Services: ", label),
        Span::styled(data.services.len().to_string(), value),
        Span::styled("  Routes: ", label),
        Span::styled(data.routes.len().to_string(), value),
        Span::styled("  Proto Mappings: ", label),
        Span::styled(data.proto_mappings.len().to_string(), value),
        Span::styled("  Requests: ", label),
        Span::styled(metrics.total_requests().to_string(), value),
        Span::styled("  Errors: ", label),
        Span::styled(
            metrics.total_errors().to_string(),
            Style::default().fg(if metrics.total_errors() > 0 {
                theme.operation_error
            } else {
                theme.text_value
            }),
        ),
        Span::styled("  Avg Latency: ", label),
        Span::styled(format!("{:.1}ms", metrics.avg_latency_ms()), value),
    ]);

    let paragraph =
        Paragraph::new(line).block(Block::default().title("Gateway").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_service_health(f: &mut Frame, area: Rect, data: &Collections, theme: &Theme) {
    let header = Row::new(vec![
        "SERVICE", "REQUESTS", "ERRORS", "ERROR %", "LATENCY", "HEALTH", "CIRCUIT",
    ])
    .style(theme.table_header_style());

    let rows: Vec<Row> = data
        .metrics
        .services
        .iter()
        .map(|(name, m)| {
            let circuit_color = if m.circuit_open() {
                theme.operation_error
            } else {
                theme.operation_success
            };
            Row::new(vec![
                Cell::from(name.clone()),
                Cell::from(m.total_requests.to_string()),
                Cell::from(m.total_errors.to_string()),
                Cell::from(format!("{:.1}", m.error_rate() * 100.0)),
                Cell::from(format!("{:.1}ms", m.avg_latency_ms)),
                Cell::from(Span::styled(
                    m.health_score.to_string(),
                    Style::default().fg(theme.health_color(m.health_score)),
                )),
                Cell::from(Span::styled(
                    if m.circuit_status.is_empty() {
                        "-".to_string()
                    } else {
                        m.circuit_status.clone()
                    },
                    Style::default().fg(circuit_color),
                )),
            ])
        })
        .collect();

    let title = format!("Service Health ({})", rows.len());
    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}
