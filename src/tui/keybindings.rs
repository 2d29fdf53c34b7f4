//! Centralized keybindings
//!
//! Single source of truth for the footer hints and the footer height
//! calculation.

use super::constants::MIN_FOOTER_HEIGHT;
use crate::store::ConsoleView;

/// Navigation command with keybinding and label
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationCommand {
    /// The keybinding string (e.g., "j/k", "Enter")
    pub key: &'static str,
    /// The human-readable label (e.g., "Navigate", "Edit")
    pub label: &'static str,
}

impl NavigationCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Commands available in `view`, in footer order
pub fn get_navigation_commands(view: ConsoleView) -> Vec<NavigationCommand> {
    let mut commands = vec![
        NavigationCommand::new("Tab/1-6", "Views"),
        NavigationCommand::new("j/k", "Navigate"),
        NavigationCommand::new("n/p", "Page"),
        NavigationCommand::new("/", "Search"),
        NavigationCommand::new("s/S", "Sort"),
    ];

    if view != ConsoleView::SystemLogs {
        commands.push(NavigationCommand::new("c", "Category"));
    }

    if view.resource_kind().is_some() {
        commands.push(NavigationCommand::new("a", "Add"));
        commands.push(NavigationCommand::new("e", "Edit"));
        commands.push(NavigationCommand::new("d", "Delete"));
    }

    if view == ConsoleView::Traffic {
        commands.push(NavigationCommand::new("t", "Trace"));
    }

    commands.push(NavigationCommand::new("r", "Refresh"));
    commands.push(NavigationCommand::new("q", "Quit"));
    commands
}

/// Commands shown while the resource form is open
pub fn get_form_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("Tab/↑↓", "Field"),
        NavigationCommand::new("Space/←→", "Choose"),
        NavigationCommand::new("Enter", "Save"),
        NavigationCommand::new("Esc", "Cancel"),
    ]
}

/// Display width of one "key label" segment including its separator
pub fn segment_width(index: usize, command: &NavigationCommand) -> usize {
    let separator = if index > 0 { 3 } else { 0 }; // " | "
    separator + command.key.chars().count() + 1 + command.label.chars().count()
}

/// Footer height needed to fit `commands` at `terminal_width`
///
/// Commands wrap onto a second line when they do not fit on one.
pub fn calculate_footer_height(terminal_width: u16, commands: &[NavigationCommand]) -> u16 {
    let available = terminal_width.saturating_sub(2) as usize; // borders
    let total: usize = commands
        .iter()
        .enumerate()
        .map(|(idx, cmd)| segment_width(idx, cmd))
        .sum();
    let lines = if total > available { 2 } else { 1 };
    (lines + 2).max(MIN_FOOTER_HEIGHT)
}
