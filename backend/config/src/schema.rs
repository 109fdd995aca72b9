//! Bot configuration schema, deserialized from camelCase YAML.
//!
//! Every leaf is optional on disk; `defaults::apply_all_defaults_with` fills the
//! gaps and the accessors below read the filled-in values.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_EWGF_BASE_URL, DEFAULT_EXPIRY_MS, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_CANDIDATES, DEFAULT_REDIRECT_BASE_URL, DEFAULT_STEAM_API_BASE_URL,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    #[serde(default)]
    pub discord: DiscordConfig,

    #[serde(default)]
    pub steam: SteamConfig,

    #[serde(default)]
    pub invite: InviteConfig,

    #[serde(default)]
    pub player_lookup: PlayerLookupConfig,

    /// Auto-react rules applied to incoming messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<ReactionRule>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BotConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.invite.expiry_ms.unwrap_or(DEFAULT_EXPIRY_MS))
    }

    pub fn redirect_base_url(&self) -> &str {
        self.invite
            .redirect_base_url
            .as_deref()
            .unwrap_or(DEFAULT_REDIRECT_BASE_URL)
    }

    pub fn steam_api_base_url(&self) -> &str {
        self.steam
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_STEAM_API_BASE_URL)
    }

    pub fn player_lookup_base_url(&self) -> &str {
        self.player_lookup
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_EWGF_BASE_URL)
    }

    pub fn max_candidates(&self) -> usize {
        self.player_lookup
            .max_candidates
            .unwrap_or(DEFAULT_MAX_CANDIDATES)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> &str {
        self.logging.dir.as_deref().unwrap_or(DEFAULT_LOG_DIR)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    /// Bot token (secret)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Register slash commands to this guild only; global when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamConfig {
    /// Steam Web API key (secret)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteConfig {
    /// How long the join button stays up, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_ms: Option<u64>,

    /// Prefix the `steam://` URI is appended to for the link button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLookupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_candidates: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRule {
    pub channel_id: String,
    pub author_id: String,
    /// Unicode emoji or `<:name:id>` / `<a:name:id>`
    pub emoji: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for the rolling NDJSON log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
discord:
  token: abc
  guildId: "123"
invite:
  expiryMs: 60000
playerLookup:
  maxCandidates: 5
reactions:
  - channelId: "1"
    authorId: "2"
    emoji: "<:side_eye:3>"
"#;
        let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.discord.guild_id.as_deref(), Some("123"));
        assert_eq!(config.expiry(), Duration::from_secs(60));
        assert_eq!(config.max_candidates(), 5);
        assert_eq!(config.reactions[0].emoji, "<:side_eye:3>");
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.expiry(), Duration::from_millis(300_000));
        assert_eq!(config.steam_api_base_url(), "https://api.steampowered.com");
        assert_eq!(config.log_level(), "info");
    }
}
