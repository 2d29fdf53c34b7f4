//! Configuration system for gate9s
//!
//! Layers built-in defaults, the root config file and environment
//! overrides, and exposes dot-notation access for the `config` subcommand.

pub mod duration;
pub mod loader;
pub mod paths;
pub mod schema;

pub use duration::parse_duration;
pub use loader::ConfigLoader;
pub use schema::{Config, GatewayConfig, LoggerConfig, RefreshConfig, UiConfig};

use anyhow::Context;

/// Every key accepted by `get_config_value` and `set_config_value`
pub const CONFIG_KEYS: &[&str] = &[
    "gateway.baseUrl",
    "gateway.timeout",
    "refresh.metricsInterval",
    "refresh.serverLogInterval",
    "refresh.coalesce",
    "ui.pageSize",
    "ui.defaultView",
    "ui.enableMouse",
    "ui.noIcons",
    "logger.buffer",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "gateway.baseUrl" => Ok(config.gateway.base_url.clone()),
        "gateway.timeout" => Ok(config.gateway.timeout.clone()),
        "refresh.metricsInterval" => Ok(config.refresh.metrics_interval.clone()),
        "refresh.serverLogInterval" => Ok(config.refresh.server_log_interval.clone()),
        "refresh.coalesce" => Ok(config.refresh.coalesce.to_string()),
        "ui.pageSize" => Ok(config.ui.page_size.to_string()),
        "ui.defaultView" => Ok(config.ui.default_view.clone()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        "logger.buffer" => Ok(config.logger.buffer.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
///
/// Durations and the view name are checked before they are stored.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "gateway.baseUrl" => {
            url::Url::parse(value).context("gateway.baseUrl must be a URL")?;
            config.gateway.base_url = value.to_string();
        }
        "gateway.timeout" => {
            parse_duration(value).context("gateway.timeout must be a duration")?;
            config.gateway.timeout = value.to_string();
        }
        "refresh.metricsInterval" => {
            parse_duration(value).context("refresh.metricsInterval must be a duration")?;
            config.refresh.metrics_interval = value.to_string();
        }
        "refresh.serverLogInterval" => {
            parse_duration(value).context("refresh.serverLogInterval must be a duration")?;
            config.refresh.server_log_interval = value.to_string();
        }
        "refresh.coalesce" => {
            config.refresh.coalesce = value
                .parse()
                .context("refresh.coalesce must be 'true' or 'false'")?;
        }
        "ui.pageSize" => {
            config.ui.page_size = value.parse().context("ui.pageSize must be a number")?;
        }
        "ui.defaultView" => {
            let view: crate::store::ConsoleView =
                value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            config.ui.default_view = view.as_str().to_string();
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        "logger.buffer" => {
            config.logger.buffer = value.parse().context("logger.buffer must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
