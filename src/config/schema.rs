//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use super::duration::parse_duration;
use crate::poller::PollIntervals;
use crate::store::ConsoleView;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Gateway admin API connection
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Background refresh timers
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Gateway connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Base URL the `/admin/` API is served under
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (e.g. "30s", "500ms")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

/// Refresh timer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshConfig {
    /// Metrics refresh period while the console is open
    #[serde(default = "default_metrics_interval")]
    pub metrics_interval: String,

    /// Server console refresh period while the system-log view is active
    #[serde(default = "default_server_log_interval")]
    pub server_log_interval: String,

    /// Drop responses older than the last one applied for a collection
    #[serde(default = "default_false")]
    pub coalesce: bool,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Rows per table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// View shown at startup
    #[serde(default = "default_view")]
    pub default_view: String,

    /// Enable mouse support
    #[serde(default = "default_false")]
    pub enable_mouse: bool,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Max server console lines kept in view
    #[serde(default = "default_log_buffer")]
    pub buffer: usize,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_metrics_interval() -> String {
    "20s".to_string()
}

fn default_server_log_interval() -> String {
    "5s".to_string()
}

fn default_false() -> bool {
    false
}

fn default_page_size() -> usize {
    10
}

fn default_view() -> String {
    ConsoleView::Overview.as_str().to_string()
}

fn default_log_buffer() -> usize {
    crate::store::DEFAULT_SERVER_LOG_CAPACITY
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            metrics_interval: default_metrics_interval(),
            server_log_interval: default_server_log_interval(),
            coalesce: default_false(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_view: default_view(),
            enable_mouse: default_false(),
            no_icons: default_false(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            buffer: default_log_buffer(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(&self.gateway.timeout).context("Invalid gateway.timeout")
    }

    pub fn poll_intervals(&self) -> Result<PollIntervals> {
        Ok(PollIntervals {
            metrics: parse_duration(&self.refresh.metrics_interval)
                .context("Invalid refresh.metricsInterval")?,
            server_log: parse_duration(&self.refresh.server_log_interval)
                .context("Invalid refresh.serverLogInterval")?,
        })
    }

    pub fn default_view(&self) -> Result<ConsoleView> {
        self.ui
            .default_view
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Invalid ui.defaultView")
    }
}
