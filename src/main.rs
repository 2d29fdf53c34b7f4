//! gate9s - A K9s-inspired terminal console for a request-routing gateway
//!
//! Browses and edits the gateway's services, routes and proto mappings and
//! follows its traffic, activity and server logs through the admin API.

use anyhow::{Context, Result};
use clap::Parser;
use gate9s::cli::{self, Args, Command};
use gate9s::config::ConfigLoader;
use gate9s::services::ConsoleSession;
use gate9s::tui;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Some(Command::Config { subcommand }) => {
            return cli::handle_config_command(subcommand.clone());
        }
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        _ => {}
    }

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let mut config = ConfigLoader::load().context("Failed to load configuration")?;
    args.apply_to(&mut config)?;
    tracing::debug!(
        "Configuration loaded: gateway={}, view={}",
        config.gateway.base_url,
        config.ui.default_view
    );

    if let Some(Command::Snapshot { .. }) = args.command {
        let view = config.default_view()?;
        return cli::run_snapshot(&config, view).await;
    }

    let session = ConsoleSession::connect(&config)?;
    tracing::info!("Connecting to gateway: {}", config.gateway.base_url);

    tui::run_tui(session, config, tui::Theme::default()).await
}
