//! Config defaults: fills unset values, including secrets from the environment.

use std::collections::HashMap;

use crate::schema::BotConfig;

pub const DEFAULT_EXPIRY_MS: u64 = 300_000;
pub const DEFAULT_REDIRECT_BASE_URL: &str =
    "https://frostemanneogard.github.io/uri-redirector/?uri=";
pub const DEFAULT_STEAM_API_BASE_URL: &str = "https://api.steampowered.com";
pub const DEFAULT_EWGF_BASE_URL: &str = "https://ewgf.gg";
pub const DEFAULT_MAX_CANDIDATES: usize = 8;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Env var read when `discord.token` is unset.
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Env var read when `steam.apiKey` is unset.
pub const STEAM_API_KEY_VAR: &str = "STEAM_API_KEY";

/// Apply all defaults using the given environment (useful for testing).
pub fn apply_all_defaults_with(config: BotConfig, env: &HashMap<String, String>) -> BotConfig {
    let config = apply_secret_defaults(config, env);
    let config = apply_invite_defaults(config);
    let config = apply_lookup_defaults(config);
    apply_logging_defaults(config)
}

fn from_env(env: &HashMap<String, String>, var: &str) -> Option<String> {
    env.get(var).filter(|v| !v.trim().is_empty()).cloned()
}

fn apply_secret_defaults(mut config: BotConfig, env: &HashMap<String, String>) -> BotConfig {
    if config.discord.token.is_none() {
        config.discord.token = from_env(env, DISCORD_TOKEN_VAR);
    }
    if config.steam.api_key.is_none() {
        config.steam.api_key = from_env(env, STEAM_API_KEY_VAR);
    }
    config
}

fn apply_invite_defaults(mut config: BotConfig) -> BotConfig {
    config.invite.expiry_ms.get_or_insert(DEFAULT_EXPIRY_MS);
    config
        .invite
        .redirect_base_url
        .get_or_insert_with(|| DEFAULT_REDIRECT_BASE_URL.to_string());
    config
        .steam
        .api_base_url
        .get_or_insert_with(|| DEFAULT_STEAM_API_BASE_URL.to_string());
    config
}

fn apply_lookup_defaults(mut config: BotConfig) -> BotConfig {
    let lookup = &mut config.player_lookup;
    lookup
        .api_base_url
        .get_or_insert_with(|| DEFAULT_EWGF_BASE_URL.to_string());
    lookup.max_candidates.get_or_insert(DEFAULT_MAX_CANDIDATES);
    config
}

fn apply_logging_defaults(mut config: BotConfig) -> BotConfig {
    config
        .logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
        .logging
        .dir
        .get_or_insert_with(|| DEFAULT_LOG_DIR.to_string());
    config
}
