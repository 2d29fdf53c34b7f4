//! Theme and styling definitions
//!
//! Centralizes every color the console uses so views never hard-code one.

use crate::models::{ActivityAction, TraceLevel};
use ratatui::style::{Color, Modifier, Style};

/// Color palette for the console
pub struct Theme {
    // Header colors
    pub header_title: Color,
    pub header_gateway: Color,
    pub header_tab: Color,
    pub header_tab_active: Color,
    pub header_loading: Color,

    // Status colors
    pub status_ok: Color,
    pub status_redirect: Color,
    pub status_client_error: Color,
    pub status_server_error: Color,
    pub status_unknown: Color,

    // Table colors
    pub table_header: Color,
    pub table_selected: Color,
    pub table_selected_bg: Color,
    pub table_normal: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,
    pub text_value: Color,

    // Input colors
    pub search_prompt: Color,
    pub form_focus: Color,
    pub form_error: Color,

    // Operation colors
    pub operation_success: Color,
    pub operation_error: Color,
    pub operation_warning: Color,
    pub operation_confirm: Color,
    pub operation_cancel: Color,

    // Footer colors
    pub footer_key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_title: Color::Cyan,
            header_gateway: Color::Yellow,
            header_tab: Color::Gray,
            header_tab_active: Color::Yellow,
            header_loading: Color::Magenta,

            status_ok: Color::Green,
            status_redirect: Color::Cyan,
            status_client_error: Color::Yellow,
            status_server_error: Color::Red,
            status_unknown: Color::Gray,

            table_header: Color::Cyan,
            table_selected: Color::Blue,
            table_selected_bg: Color::DarkGray,
            table_normal: Color::White,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,
            text_value: Color::White,

            search_prompt: Color::Yellow,
            form_focus: Color::Yellow,
            form_error: Color::Red,

            operation_success: Color::Green,
            operation_error: Color::Red,
            operation_warning: Color::Yellow,
            operation_confirm: Color::Green,
            operation_cancel: Color::Red,

            footer_key: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn header_tab_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.header_tab_active)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(self.header_tab)
        }
    }

    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.table_header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_selected_style(&self) -> Style {
        Style::default()
            .fg(self.table_selected)
            .bg(self.table_selected_bg)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_label)
    }

    /// Color for an HTTP status code
    pub fn status_code_color(&self, status: u16) -> Color {
        match status {
            200..=299 => self.status_ok,
            300..=399 => self.status_redirect,
            400..=499 => self.status_client_error,
            500..=599 => self.status_server_error,
            _ => self.status_unknown,
        }
    }

    pub fn activity_color(&self, action: ActivityAction) -> Color {
        match action {
            ActivityAction::Create => self.operation_success,
            ActivityAction::Update => self.operation_warning,
            ActivityAction::Delete => self.operation_error,
            ActivityAction::Unknown => self.text_secondary,
        }
    }

    pub fn trace_level_color(&self, level: TraceLevel) -> Color {
        match level {
            TraceLevel::Info => self.text_primary,
            TraceLevel::Warn => self.operation_warning,
            TraceLevel::Error => self.operation_error,
            TraceLevel::Unknown => self.text_secondary,
        }
    }

    /// Color for a 0-100 health score
    pub fn health_color(&self, score: u32) -> Color {
        match score {
            80.. => self.status_ok,
            50..=79 => self.status_client_error,
            _ => self.status_server_error,
        }
    }

    pub fn operation_success_style(&self) -> Style {
        Style::default()
            .fg(self.operation_success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn operation_error_style(&self) -> Style {
        Style::default()
            .fg(self.operation_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn operation_warning_style(&self) -> Style {
        Style::default()
            .fg(self.operation_warning)
            .add_modifier(Modifier::BOLD)
    }
}
