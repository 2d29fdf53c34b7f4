//! Table rendering for the resource and log listings
//!
//! Every table goes through `render_listing`, which derives the visible page
//! from the listing's view state and draws the header, rows and a title
//! carrying the match count, active filters and page position.

use crate::listing::{CategoryFilter, Listing, SortKey, ViewState};
use crate::models::{
    ActivityLogEntry, ProtoMapping, RequestLogEntry, Route, ServerLogEntry, Service,
};
use crate::tui::constants::MAX_CELL_WIDTH;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{format_timestamp, render_empty_state, truncate_message};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};

/// A table column: header label and width
pub struct Column {
    pub label: &'static str,
    pub width: Constraint,
}

const fn col(label: &'static str, width: Constraint) -> Column {
    Column { label, width }
}

/// Title line shown above a listing
pub fn listing_title<T: Listing>(
    name: &str,
    state: &ViewState<T>,
    total_matches: usize,
    total_pages: usize,
) -> String {
    let mut title = format!("{} ({})", name, total_matches);
    if !state.search().is_empty() {
        title.push_str(&format!(" /{}", state.search()));
    }
    if *state.category() != CategoryFilter::All {
        title.push_str(&format!(" [{}]", state.category()));
    }
    title.push_str(&format!(" page {}/{}", state.page(), total_pages.max(1)));
    title
}

fn header_row<T: Listing>(columns: &[Column], state: &ViewState<T>, theme: &Theme) -> Row<'static> {
    let sort = state.sort();
    let cells = columns.iter().map(|c| {
        match sort {
            Some((key, direction)) if key.label() == c.label => {
                Cell::from(format!("{}{}", c.label, direction.arrow()))
            }
            _ => Cell::from(c.label),
        }
    });
    Row::new(cells).style(theme.table_header_style())
}

/// Draw one page of `source` as a table
pub fn render_listing<T: Listing>(
    f: &mut Frame,
    area: Rect,
    name: &str,
    state: &ViewState<T>,
    source: &[T],
    columns: &[Column],
    cells: impl Fn(&T, &Theme) -> Vec<Cell<'static>>,
    selected: usize,
    theme: &Theme,
) {
    let view = state.derive(source);
    let title = listing_title(name, state, view.total_matches, view.total_pages);

    if view.is_empty() {
        let (message, hint) = if source.is_empty() {
            (format!("No {} yet", name.to_lowercase()), "Press r to refresh")
        } else if view.total_matches == 0 {
            ("No matches".to_string(), "Press / then Esc to clear the search")
        } else {
            ("Page is empty".to_string(), "Press p to go back a page")
        };
        render_empty_state(f, area, &title, &message, hint, theme);
        return;
    }

    let rows: Vec<Row> = view
        .rows
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let style = if idx == selected {
                theme.table_selected_style()
            } else {
                Style::default().fg(theme.table_normal)
            };
            Row::new(cells(record, theme)).style(style)
        })
        .collect();

    let table = Table::new(rows, columns.iter().map(|c| c.width))
        .header(header_row(columns, state, theme))
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}

fn text(value: &str) -> Cell<'static> {
    Cell::from(truncate_message(if value.is_empty() { "-" } else { value }, MAX_CELL_WIDTH))
}

const SERVICE_COLUMNS: &[Column] = &[
    col("ID", Constraint::Length(6)),
    col("NAME", Constraint::Min(20)),
    col("PROTOCOL", Constraint::Length(10)),
    col("TARGET", Constraint::Min(30)),
    col("UPDATED", Constraint::Length(20)),
];

pub fn render_services(
    f: &mut Frame,
    area: Rect,
    state: &ViewState<Service>,
    source: &[Service],
    selected: usize,
    theme: &Theme,
) {
    render_listing(f, area, "Services", state, source, SERVICE_COLUMNS, |s, _| {
        vec![
            Cell::from(s.id.to_string()),
            text(&s.name),
            Cell::from(s.protocol.as_str()),
            text(s.target()),
            Cell::from(format_timestamp(s.updated_at.or(s.created_at))),
        ]
    }, selected, theme);
}

const ROUTE_COLUMNS: &[Column] = &[
    col("ID", Constraint::Length(6)),
    col("METHOD", Constraint::Length(8)),
    col("PATH", Constraint::Min(24)),
    col("SERVICE", Constraint::Min(16)),
    col("FILTER", Constraint::Min(16)),
    col("TAG", Constraint::Length(12)),
];

pub fn render_routes(
    f: &mut Frame,
    area: Rect,
    state: &ViewState<Route>,
    source: &[Route],
    selected: usize,
    theme: &Theme,
) {
    render_listing(f, area, "Routes", state, source, ROUTE_COLUMNS, |r, _| {
        vec![
            Cell::from(r.id.to_string()),
            text(&r.method),
            text(&r.path),
            text(r.service_name()),
            text(&r.endpoint_filter),
            text(&r.tag),
        ]
    }, selected, theme);
}

const PROTO_MAPPING_COLUMNS: &[Column] = &[
    col("ID", Constraint::Length(6)),
    col("RPC METHOD", Constraint::Min(20)),
    col("SERVICE", Constraint::Min(14)),
    col("GRPC SERVICE", Constraint::Min(16)),
    col("PACKAGE", Constraint::Min(14)),
    col("REQUEST", Constraint::Min(14)),
    col("RESPONSE", Constraint::Min(14)),
];

pub fn render_proto_mappings(
    f: &mut Frame,
    area: Rect,
    state: &ViewState<ProtoMapping>,
    source: &[ProtoMapping],
    selected: usize,
    theme: &Theme,
) {
    render_listing(f, area, "Proto Mappings", state, source, PROTO_MAPPING_COLUMNS, |m, _| {
        vec![
            Cell::from(m.id.to_string()),
            text(&m.rpc_method),
            text(m.service_name()),
            text(&m.grpc_service_name),
            text(&m.proto_package),
            text(&m.request_type),
            text(&m.response_type),
        ]
    }, selected, theme);
}

const TRAFFIC_COLUMNS: &[Column] = &[
    col("TIME", Constraint::Length(20)),
    col("METHOD", Constraint::Length(8)),
    col("PATH", Constraint::Min(24)),
    col("STATUS", Constraint::Length(8)),
    col("LATENCY", Constraint::Length(9)),
    col("CLIENT", Constraint::Length(16)),
    col("REQUEST ID", Constraint::Min(12)),
];

pub fn render_traffic(
    f: &mut Frame,
    area: Rect,
    state: &ViewState<RequestLogEntry>,
    source: &[RequestLogEntry],
    selected: usize,
    theme: &Theme,
) {
    render_listing(f, area, "Traffic", state, source, TRAFFIC_COLUMNS, |r, theme| {
        vec![
            Cell::from(format_timestamp(r.created_at)),
            text(&r.method),
            text(&r.path),
            Cell::from(Span::styled(
                r.status_code.to_string(),
                Style::default().fg(theme.status_code_color(r.status_code)),
            )),
            Cell::from(format!("{}ms", r.latency_ms)),
            text(&r.client_ip),
            text(&r.request_id),
        ]
    }, selected, theme);
}

const ACTIVITY_COLUMNS: &[Column] = &[
    col("TIME", Constraint::Length(20)),
    col("ACTION", Constraint::Length(8)),
    col("RESOURCE", Constraint::Length(14)),
    col("USER", Constraint::Length(12)),
    col("MESSAGE", Constraint::Percentage(50)),
];

pub fn render_activity(
    f: &mut Frame,
    area: Rect,
    state: &ViewState<ActivityLogEntry>,
    source: &[ActivityLogEntry],
    selected: usize,
    theme: &Theme,
) {
    render_listing(f, area, "Activity", state, source, ACTIVITY_COLUMNS, |a, theme| {
        vec![
            Cell::from(format_timestamp(a.created_at)),
            Cell::from(Span::styled(
                a.action.as_str(),
                Style::default()
                    .fg(theme.activity_color(a.action))
                    .add_modifier(Modifier::BOLD),
            )),
            text(&a.resource),
            text(&a.user),
            text(&a.message),
        ]
    }, selected, theme);
}

const SERVER_LOG_COLUMNS: &[Column] = &[
    col("TIME", Constraint::Length(20)),
    col("MESSAGE", Constraint::Min(40)),
];

/// Server console: the rolling window of gateway log lines
pub fn render_server_log(
    f: &mut Frame,
    area: Rect,
    state: &ViewState<ServerLogEntry>,
    source: &[ServerLogEntry],
    selected: usize,
    theme: &Theme,
) {
    render_listing(f, area, "Server Log", state, source, SERVER_LOG_COLUMNS, |l, _| {
        vec![
            Cell::from(format_timestamp(l.timestamp)),
            Cell::from(l.line().to_string()),
        ]
    }, selected, theme);
}
