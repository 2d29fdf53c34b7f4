//! Rendering logic for the application
//!
//! Lays out header, content and footer, then draws at most one overlay:
//! the confirmation dialog, the resource form or the trace timeline.

use super::core::App;
use crate::store::ConsoleView;
use crate::tui::constants::{
    HEADER_HEIGHT, MIN_TERMINAL_WIDTH, POPUP_HEIGHT_PERCENT, POPUP_WIDTH_PERCENT,
};
use crate::tui::keybindings::{
    calculate_footer_height, get_form_commands, get_navigation_commands,
};
use crate::tui::views::helpers::{centered_rect, clear_area};
use crate::tui::views::*;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        self.check_status_message_timeout();

        let area = f.area();
        if area.width < MIN_TERMINAL_WIDTH {
            let message = Paragraph::new(vec![
                Line::from("Terminal too narrow"),
                Line::from(format!("Need at least {} columns", MIN_TERMINAL_WIDTH)),
            ])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(message, area);
            return;
        }

        let commands = if self.crud.is_active() {
            get_form_commands()
        } else {
            get_navigation_commands(self.view())
        };
        let footer_height = calculate_footer_height(area.width, &commands);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        let store = self.session.store();
        let loading = store.is_loading() || self.trace.is_loading();
        store.read(|data| {
            render_header(
                f,
                chunks[0],
                &self.config.gateway.base_url,
                self.view(),
                &data.metrics,
                loading,
                &self.theme,
                self.config.ui.no_icons,
            );
            self.render_content(f, chunks[1], data);
        });

        let footer = if self.ui_state.search_mode {
            FooterContent::Search(self.active_search())
        } else if let Some((message, is_error)) = &self.ui_state.status_message {
            FooterContent::Status(message, *is_error)
        } else {
            FooterContent::Commands(&commands)
        };
        render_footer(f, chunks[2], footer, &self.theme);

        self.render_overlay(f, area);
    }

    fn render_content(&self, f: &mut Frame, area: Rect, data: &crate::store::Collections) {
        let l = &self.listings;
        let selected = self.ui_state.selected_index;
        let theme = &self.theme;
        match self.view() {
            ConsoleView::Overview => {
                render_overview(f, area, data, &l.activity, selected, theme)
            }
            ConsoleView::Services => {
                render_services(f, area, &l.services, &data.services, selected, theme)
            }
            ConsoleView::Routes => {
                render_routes(f, area, &l.routes, &data.routes, selected, theme)
            }
            ConsoleView::ProtoMappings => render_proto_mappings(
                f,
                area,
                &l.proto_mappings,
                &data.proto_mappings,
                selected,
                theme,
            ),
            ConsoleView::Traffic => {
                render_traffic(f, area, &l.traffic, &data.traffic_log, selected, theme)
            }
            ConsoleView::SystemLogs => {
                render_server_log(f, area, &l.server_log, &data.server_log, selected, theme)
            }
        }
    }

    fn render_overlay(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, area);

        if let Some(pending) = &self.confirmation_pending {
            let dialog = centered_rect(POPUP_WIDTH_PERCENT, 30, area);
            clear_area(f, dialog);
            render_confirmation(f, dialog, &pending.target, &self.theme);
        } else if self.crud.is_active() {
            clear_area(f, popup);
            let services = self.session.store().services();
            render_form(
                f,
                popup,
                &self.crud,
                self.ui_state.form_focus,
                &services,
                &self.theme,
            );
        } else if self.trace.is_open() {
            clear_area(f, popup);
            render_trace(f, popup, &self.trace, &self.theme);
        }
    }

    fn active_search(&self) -> &str {
        let l = &self.listings;
        match self.view() {
            ConsoleView::Overview => l.activity.search(),
            ConsoleView::Services => l.services.search(),
            ConsoleView::Routes => l.routes.search(),
            ConsoleView::ProtoMappings => l.proto_mappings.search(),
            ConsoleView::Traffic => l.traffic.search(),
            ConsoleView::SystemLogs => l.server_log.search(),
        }
    }
}
