//! One-shot headless refresh
//!
//! Loads a view the same way the console does, prints how many entries each
//! collection holds and which fetches failed, then exits.

use anyhow::Result;
use std::fmt::Write;

use crate::config::Config;
use crate::services::ConsoleSession;
use crate::store::{Collection, Collections, ConsoleView, RefreshReport};

/// Refresh `view` (plus metrics) once and print the outcome
///
/// Exits with an error when any fetch failed.
pub async fn run_snapshot(config: &Config, view: ConsoleView) -> Result<()> {
    let session = ConsoleSession::connect(config)?;

    let mut collections = view.dependencies().to_vec();
    collections.push(Collection::Metrics);
    let report = session
        .store()
        .refresh_collections(session.api().as_ref(), &collections)
        .await;

    let output = format_report(
        &config.gateway.base_url,
        view,
        &session.store().snapshot(),
        &report,
    );
    print!("{}", output);

    if report.is_ok() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} fetches failed",
            report.failed.len(),
            collections.len()
        ))
    }
}

/// Render a refresh outcome as plain text
pub fn format_report(
    base_url: &str,
    view: ConsoleView,
    data: &Collections,
    report: &RefreshReport,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "gateway: {}", base_url);
    let _ = writeln!(out, "view:    {}", view);

    for collection in &report.succeeded {
        let _ = writeln!(
            out,
            "  {:<16} {:>6}",
            collection.as_str(),
            data.len_of(*collection)
        );
    }
    for (collection, error) in &report.failed {
        let _ = writeln!(out, "  {:<16} failed: {}", collection.as_str(), error);
    }

    if !report.succeeded.contains(&Collection::Metrics) {
        return out;
    }

    let _ = writeln!(
        out,
        "requests: {}  errors: {}",
        data.metrics.total_requests(),
        data.metrics.total_errors()
    );
    out
}
