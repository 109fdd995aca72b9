//! Builds the remote capabilities and command dispatcher from config.

use std::sync::Arc;

use anyhow::{Context, Result};
use lobbybot_commands::{
    build_dispatcher, CommandDispatcher, CommandServices, InviteSettings, LookupSettings,
};
use lobbybot_config::BotConfig;
use lobbybot_providers::{EwgfClient, SteamWebApi};

pub fn steam_api(config: &BotConfig) -> Result<SteamWebApi> {
    let api_key = config
        .steam
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .context("steam.apiKey is not configured (set it in config.yaml or STEAM_API_KEY)")?;
    Ok(SteamWebApi::new(api_key).with_base_url(config.steam_api_base_url()))
}

pub fn dispatcher(config: &BotConfig) -> Result<CommandDispatcher> {
    let services = CommandServices {
        steam: Arc::new(steam_api(config)?),
        players: Arc::new(EwgfClient::new().with_base_url(config.player_lookup_base_url())),
        invite: InviteSettings {
            redirect_base_url: config.redirect_base_url().to_string(),
            expiry: config.expiry(),
        },
        lookup: LookupSettings {
            max_candidates: config.max_candidates(),
            ..LookupSettings::default()
        },
    };
    Ok(build_dispatcher(services))
}
