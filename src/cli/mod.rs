//! CLI command handling module
//!
//! Handles argument parsing and every subcommand that runs without the TUI.

mod commands;
mod logging;
mod snapshot;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use snapshot::{format_report, run_snapshot};
pub use version::display_version;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{Config, set_config_value};

/// gate9s - A K9s-inspired terminal console for a request-routing gateway
#[derive(Parser, Debug)]
#[command(name = "gate9s")]
#[command(about = "A K9s-inspired terminal console for a request-routing gateway", long_about = None)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Gateway base URL (overrides gateway.baseUrl)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// View to start on (overview, services, routes, proto-mappings, traffic, system-logs)
    #[arg(long)]
    pub view: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Refresh a view once and print what was loaded
    Snapshot {
        /// View to load
        #[arg(long)]
        view: Option<String>,
    },
    /// Show version information
    Version,
}

impl Args {
    /// Apply command-line overrides on top of loaded configuration
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            set_config_value(config, "gateway.baseUrl", base_url)?;
        }
        let view = match &self.command {
            Some(Command::Snapshot { view: Some(view) }) => Some(view),
            _ => self.view.as_ref(),
        };
        if let Some(view) = view {
            set_config_value(config, "ui.defaultView", view)?;
        }
        Ok(())
    }
}
