//! Constants used throughout the TUI module

/// Status message timeout in seconds
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

/// How long the event loop waits for input before servicing async results
pub const INPUT_POLL_MS: u64 = 100;

/// Minimum terminal width required for the TUI
pub const MIN_TERMINAL_WIDTH: u16 = 80;

/// Header height: title line, tab line, borders
pub const HEADER_HEIGHT: u16 = 4;

/// Default minimum footer height
pub const MIN_FOOTER_HEIGHT: u16 = 3;

/// Longest cell text shown before truncation
pub const MAX_CELL_WIDTH: usize = 48;

/// Recent activity entries shown on the overview
pub const OVERVIEW_ACTIVITY_ROWS: u16 = 8;

/// Popup size as a percentage of the terminal
pub const POPUP_WIDTH_PERCENT: u16 = 60;
pub const POPUP_HEIGHT_PERCENT: u16 = 60;
