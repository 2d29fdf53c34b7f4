//! Event handling for the application
//!
//! Keyboard input is routed by mode, most specific first: confirmation
//! prompt, resource form, trace overlay, search input, then the listing.

use super::core::App;
use crate::crud::FormField;
use crate::store::ConsoleView;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns true when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.confirmation_pending.is_some() {
            self.handle_confirmation_key(key);
            return false;
        }

        if self.crud.is_active() {
            self.handle_form_key(key);
            return false;
        }

        if self.trace.is_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.trace.close();
            }
            return false;
        }

        if self.ui_state.search_mode {
            self.handle_search_key(key);
            return false;
        }

        self.check_status_message_timeout();
        self.handle_listing_key(key)
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_confirmation(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.answer_confirmation(false)
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.ui_state.search_mode = false;
            }
            KeyCode::Esc => {
                self.ui_state.search_mode = false;
                self.active_listing().set_search(String::new());
            }
            KeyCode::Backspace => {
                let mut text = self.active_listing().search().to_string();
                text.pop();
                self.active_listing().set_search(text);
            }
            KeyCode::Char(c) => {
                let mut text = self.active_listing().search().to_string();
                text.push(c);
                self.active_listing().set_search(text);
            }
            _ => return,
        }
        self.ui_state.selected_index = 0;
    }

    fn handle_listing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.ui_state.status_message.is_some() {
                    self.ui_state.status_message = None;
                    self.ui_state.status_message_time = None;
                } else if self.view() != ConsoleView::Overview {
                    self.switch_view(ConsoleView::Overview);
                } else {
                    return true;
                }
            }
            KeyCode::Tab => self.switch_view(self.view().next()),
            KeyCode::BackTab => self.switch_view(self.view().prev()),
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                if let Some(view) = ConsoleView::from_index(index) {
                    self.switch_view(view);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let (rows, _) = self.active_page_info();
                if self.ui_state.selected_index + 1 < rows {
                    self.ui_state.selected_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui_state.selected_index = self.ui_state.selected_index.saturating_sub(1);
            }
            KeyCode::Char('n') | KeyCode::PageDown | KeyCode::Right => {
                let (_, total_pages) = self.active_page_info();
                if self.active_listing().next_page(total_pages) {
                    self.ui_state.selected_index = 0;
                }
            }
            KeyCode::Char('p') | KeyCode::PageUp | KeyCode::Left => {
                if self.active_listing().prev_page() {
                    self.ui_state.selected_index = 0;
                }
            }
            KeyCode::Char('/') => {
                self.ui_state.search_mode = true;
            }
            KeyCode::Char('c') => self.cycle_active_category(),
            KeyCode::Char('s') => {
                self.active_listing().cycle_sort();
                self.ui_state.selected_index = 0;
            }
            KeyCode::Char('S') => {
                self.active_listing().toggle_direction();
                self.ui_state.selected_index = 0;
            }
            KeyCode::Char('r') => self.spawn_refresh(),
            KeyCode::Char('a') => {
                if let Some(kind) = self.view().resource_kind() {
                    if self.crud.open_create(kind).is_ok() {
                        self.ui_state.form_focus = 0;
                    }
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(draft) = self.selected_draft() {
                    if self.crud.open_edit(draft).is_ok() {
                        self.ui_state.form_focus = 0;
                    }
                }
            }
            KeyCode::Char('d') => self.trigger_delete(),
            KeyCode::Char('t') => {
                if self.view() == ConsoleView::Traffic {
                    self.trigger_trace();
                }
            }
            _ => {}
        }
        false
    }

    /// Field currently focused in the open form
    pub fn focused_field(&self) -> Option<FormField> {
        let session = self.crud.session()?;
        let fields = session.draft.fields();
        fields
            .get(self.ui_state.form_focus.min(fields.len().saturating_sub(1)))
            .copied()
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if self.crud.is_submitting() {
            return;
        }
        let Some(field) = self.focused_field() else {
            return;
        };
        let field_count = self
            .crud
            .session()
            .map(|s| s.draft.fields().len())
            .unwrap_or(1);
        let services = self.session.store().services();

        match key.code {
            KeyCode::Esc => {
                self.crud.cancel();
                self.ui_state.form_focus = 0;
            }
            KeyCode::Enter => self.trigger_submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.ui_state.form_focus = (self.ui_state.form_focus + 1) % field_count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.ui_state.form_focus =
                    (self.ui_state.form_focus + field_count - 1) % field_count;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if field.is_choice() => {
                let forward = key.code != KeyCode::Left;
                if let Some(draft) = self.crud.draft_mut() {
                    draft.cycle(field, &services, forward);
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.crud.draft_mut() {
                    draft.backspace(field);
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = self.crud.draft_mut() {
                    draft.input_char(field, c);
                }
            }
            _ => {}
        }
    }
}
