//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
///
/// Logs go to a temp file so the TUI keeps stdout to itself. Returns the log
/// file path when debug logging is enabled.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        // Silent by default
        return None;
    }

    let (file, path) = match tempfile::Builder::new()
        .prefix("gate9s-")
        .suffix(".log")
        .tempfile()
        .and_then(|f| f.keep().map_err(|e| e.error))
    {
        Ok(kept) => kept,
        Err(e) => {
            eprintln!("Failed to create log file: {}", e);
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gate9s=debug")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(path)
}
