//! Config validation with user-friendly messages.
//!
//! Errors make the bot unable to run; warnings are logged and tolerated.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::schema::BotConfig;

/// Discord snowflakes are decimal strings.
static SNOWFLAKE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{15,21}$").unwrap());

/// `<:name:id>` or `<a:name:id>` custom guild emoji.
static CUSTOM_EMOJI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<a?:[A-Za-z0-9_]{2,32}:[0-9]{15,21}>$").unwrap());

/// Steam Web API keys are 32 hex characters.
static STEAM_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{32}$").unwrap());

/// Interaction tokens, needed to edit an expired invite, are valid this long.
const INTERACTION_TOKEN_TTL_MS: u64 = 15 * 60 * 1000;

/// Discord allows at most 25 fields per embed.
pub const MAX_CANDIDATES_LIMIT: usize = 25;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &BotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_discord(config, &mut report);
    validate_steam(config, &mut report);
    validate_invite(config, &mut report);
    validate_player_lookup(config, &mut report);
    validate_reactions(config, &mut report);
    report
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map(str::is_empty).unwrap_or(true)
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn validate_discord(config: &BotConfig, report: &mut ValidationReport) {
    if is_blank(&config.discord.token) {
        report.error("discord.token", "Discord bot token is required");
    }
    match config.discord.guild_id.as_deref() {
        None | Some("") => report.warn(
            "discord.guildId",
            "No guild configured; commands are registered globally and may take up to an hour to appear",
        ),
        Some(id) if !SNOWFLAKE_PATTERN.is_match(id) => {
            report.error("discord.guildId", format!("'{id}' is not a Discord id"))
        }
        Some(_) => {}
    }
}

fn validate_steam(config: &BotConfig, report: &mut ValidationReport) {
    match config.steam.api_key.as_deref() {
        None | Some("") => report.error("steam.apiKey", "Steam Web API key is required"),
        Some(key) if !STEAM_KEY_PATTERN.is_match(key) => report.warn(
            "steam.apiKey",
            "Steam Web API keys are usually 32 hex characters",
        ),
        Some(_) => {}
    }
    if !is_http_url(config.steam_api_base_url()) {
        report.error("steam.apiBaseUrl", "Must be an http(s) URL");
    }
}

fn validate_invite(config: &BotConfig, report: &mut ValidationReport) {
    match config.invite.expiry_ms {
        Some(0) => report.error("invite.expiryMs", "expiryMs must be > 0"),
        Some(ms) if ms > INTERACTION_TOKEN_TTL_MS => report.warn(
            "invite.expiryMs",
            "Invites outliving the 15 minute interaction token cannot be marked expired",
        ),
        _ => {}
    }
    if !is_http_url(config.redirect_base_url()) {
        report.error("invite.redirectBaseUrl", "Must be an http(s) URL");
    }
}

fn validate_player_lookup(config: &BotConfig, report: &mut ValidationReport) {
    if !is_http_url(config.player_lookup_base_url()) {
        report.error("playerLookup.apiBaseUrl", "Must be an http(s) URL");
    }
    if let Some(max) = config.player_lookup.max_candidates {
        if max == 0 || max > MAX_CANDIDATES_LIMIT {
            report.error(
                "playerLookup.maxCandidates",
                format!("maxCandidates must be between 1 and {MAX_CANDIDATES_LIMIT}"),
            );
        }
    }
}

fn validate_reactions(config: &BotConfig, report: &mut ValidationReport) {
    for (i, rule) in config.reactions.iter().enumerate() {
        let path = format!("reactions[{i}]");
        if !SNOWFLAKE_PATTERN.is_match(&rule.channel_id) {
            report.error(format!("{path}.channelId"), "Must be a Discord id");
        }
        if !SNOWFLAKE_PATTERN.is_match(&rule.author_id) {
            report.error(format!("{path}.authorId"), "Must be a Discord id");
        }
        let emoji = rule.emoji.trim();
        if emoji.is_empty() {
            report.error(format!("{path}.emoji"), "Emoji cannot be empty");
        } else if emoji.starts_with('<') && !CUSTOM_EMOJI_PATTERN.is_match(emoji) {
            report.error(
                format!("{path}.emoji"),
                "Custom emoji must look like <:name:id> or <a:name:id>",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ReactionRule;

    fn runnable() -> BotConfig {
        let mut cfg = BotConfig::default();
        cfg.discord.token = Some("bot-token".into());
        cfg.discord.guild_id = Some("123456789012345678".into());
        cfg.steam.api_key = Some("0123456789abcdef0123456789abcdef".into());
        cfg
    }

    #[test]
    fn runnable_config_is_clean() {
        let report = validate(&runnable());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn missing_secrets_are_errors() {
        let report = validate(&BotConfig::default());
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"discord.token"));
        assert!(paths.contains(&"steam.apiKey"));
    }

    #[test]
    fn missing_guild_is_only_a_warning() {
        let mut cfg = runnable();
        cfg.discord.guild_id = None;
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "discord.guildId");
    }

    #[test]
    fn zero_expiry_is_error() {
        let mut cfg = runnable();
        cfg.invite.expiry_ms = Some(0);
        assert_eq!(validate(&cfg).errors[0].path, "invite.expiryMs");
    }

    #[test]
    fn long_expiry_is_a_warning() {
        let mut cfg = runnable();
        cfg.invite.expiry_ms = Some(20 * 60 * 1000);
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "invite.expiryMs");
    }

    #[test]
    fn max_candidates_bounds() {
        let mut cfg = runnable();
        cfg.player_lookup.max_candidates = Some(26);
        assert!(!validate(&cfg).is_valid());
        cfg.player_lookup.max_candidates = Some(25);
        assert!(validate(&cfg).is_valid());
    }

    #[test]
    fn non_http_redirect_is_error() {
        let mut cfg = runnable();
        cfg.invite.redirect_base_url = Some("steam://".into());
        assert_eq!(validate(&cfg).errors[0].path, "invite.redirectBaseUrl");
    }

    #[test]
    fn reaction_rules_are_checked() {
        let mut cfg = runnable();
        cfg.reactions = vec![
            ReactionRule {
                channel_id: "123456789012345678".into(),
                author_id: "876543210987654321".into(),
                emoji: "<:pepe:112233445566778899>".into(),
            },
            ReactionRule {
                channel_id: "general".into(),
                author_id: "876543210987654321".into(),
                emoji: "<:broken>".into(),
            },
        ];
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["reactions[1].channelId", "reactions[1].emoji"]);
    }
}
