//! `lobbybot-config`: runtime configuration for the lobby bot.
//!
//! Provides:
//! - Typed config schema (Discord, Steam, invite, player lookup, reactions)
//! - YAML loading from the config directory
//! - `${ENV_VAR}` substitution
//! - Config redaction for safe display
//! - Default value application with env fallbacks for secrets
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults_with;
pub use env::{collect_referenced_vars, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use redact::{collect_redacted_paths, redact};
pub use schema::{BotConfig, ReactionRule};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load, apply env substitution, and apply defaults to a config file.
///
/// This is the main entry point for loading a config at runtime. It does not
/// validate: callers run [`validate`] once logging is up.
pub async fn load_and_prepare(path: &Path) -> Result<BotConfig> {
    let raw = load_config(path).await?;
    prepare_with(&raw, &std::env::vars().collect())
}

/// Substitute env vars, deserialize, and apply defaults against an explicit environment.
pub fn prepare_with(raw: &Value, env: &HashMap<String, String>) -> Result<BotConfig> {
    let value = resolve_env_vars_with(raw, env).context("Failed to resolve env vars in config")?;
    let config: BotConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;
    Ok(apply_all_defaults_with(config, env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prepares_config_from_file_and_env() {
        let raw = parse_config(
            "discord:\n  token: ${BOT_TOKEN}\n  guildId: \"123456789012345678\"\ninvite:\n  expiryMs: 60000\n",
        )
        .unwrap();
        let config = prepare_with(
            &raw,
            &env(&[("BOT_TOKEN", "tok"), ("STEAM_API_KEY", "steam-key")]),
        )
        .unwrap();

        assert_eq!(config.discord.token.as_deref(), Some("tok"));
        assert_eq!(config.steam.api_key.as_deref(), Some("steam-key"));
        assert_eq!(config.expiry().as_millis(), 60_000);
        assert_eq!(config.max_candidates(), 8);
    }

    #[test]
    fn empty_file_uses_env_secrets_and_defaults() {
        let config = prepare_with(
            &json!({}),
            &env(&[("DISCORD_TOKEN", "tok"), ("STEAM_API_KEY", "key")]),
        )
        .unwrap();
        assert_eq!(config.discord.token.as_deref(), Some("tok"));
        assert_eq!(config.expiry().as_millis(), 300_000);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn missing_reference_is_an_error() {
        let raw = json!({"steam": {"apiKey": "${NOT_SET_ANYWHERE}"}});
        let err = prepare_with(&raw, &HashMap::new()).unwrap_err();
        assert!(format!("{err:#}").contains("NOT_SET_ANYWHERE"));
    }

    #[tokio::test]
    async fn loading_leaves_validation_to_the_caller() {
        let dir = std::env::temp_dir().join(format!("lobbybot-config-{}-load", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "invite:\n  expiryMs: 0\n").unwrap();

        let config = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.expiry().as_millis(), 0);
        assert!(validate(&config)
            .errors
            .iter()
            .any(|e| e.path == "invite.expiryMs"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn wrong_type_fails_to_deserialize() {
        let raw = json!({"invite": {"expiryMs": "soon"}});
        assert!(prepare_with(&raw, &HashMap::new()).is_err());
    }
}
