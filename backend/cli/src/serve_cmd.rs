//! CLI Serve Command
//!
//! Loads config, starts logging, and runs the Discord adapter until Ctrl-C.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use lobbybot_channels::{ChannelAdapter, DiscordAdapter, DiscordSettings};
use tracing::info;

use crate::services;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = lobbybot_config::load_and_prepare(config_path).await?;
    lobbybot_logging::init_logger(config.log_dir(), config.log_level());

    let report = lobbybot_config::validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, "{}", warning.message);
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, "{}", error.message);
        }
        anyhow::bail!(
            "refusing to start: {} config error(s) in {}",
            report.errors.len(),
            config_path.display()
        );
    }

    let dispatcher = Arc::new(services::dispatcher(&config)?);
    let adapter = DiscordAdapter::new(DiscordSettings::from_config(&config)?, dispatcher);

    info!(
        adapter = adapter.name(),
        expiry_ms = config.expiry().as_millis() as u64,
        reactions = config.reactions.len(),
        "Starting lobby bot"
    );

    tokio::select! {
        result = adapter.start() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}
