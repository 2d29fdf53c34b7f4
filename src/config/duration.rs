//! Duration strings used in configuration ("30s", "500ms", "1m", "2h")

use anyhow::{Context, Result};
use std::time::Duration;

/// Parse a duration string; a bare number is read as seconds
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.trim().parse().context("Invalid duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.trim().parse().context("Invalid duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.trim().parse().context("Invalid duration")?;
        Ok(Duration::from_secs(mins * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.trim().parse().context("Invalid duration")?;
        Ok(Duration::from_secs(hours * 3600))
    } else {
        let secs: u64 = s
            .parse()
            .with_context(|| format!("Invalid duration '{}' (use e.g. 30s, 500ms, 1m)", s))?;
        Ok(Duration::from_secs(secs))
    }
}
