//! CLI Resolve Command
//!
//! Runs the invite pipeline once against the configured Steam API.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use lobbybot_core::{RawReference, ResolutionOutcome};
use lobbybot_invite::InvitePipeline;

use crate::services;
use crate::terminal_output::{note_error, note_info, note_success};

pub async fn run(config_path: &Path, url: &str) -> Result<()> {
    let config = lobbybot_config::load_and_prepare(config_path).await?;
    lobbybot_logging::init_logger(config.log_dir(), config.log_level());

    let pipeline = InvitePipeline::new(Arc::new(services::steam_api(&config)?));
    let outcome = pipeline.run(&RawReference::from(url)).await;

    match &outcome {
        ResolutionOutcome::Direct(uri) | ResolutionOutcome::Resolved(uri) => {
            note_success(&format!("{} invite: {uri}", outcome.label()));
            note_info(&format!("Join button: {}{uri}", config.redirect_base_url()));
            Ok(())
        }
        ResolutionOutcome::Failed(reason) => {
            note_error(&format!("{}: {reason}", reason.code()));
            anyhow::bail!("could not resolve {url}")
        }
    }
}
