//! Config file location and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Overrides the config directory when set.
pub const CONFIG_DIR_VAR: &str = "LOBBYBOT_CONFIG_DIR";

/// Resolve the config directory.
/// Priority: `LOBBYBOT_CONFIG_DIR` env > `~/.lobbybot/` > `./.lobbybot`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_VAR) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::home_dir() {
        Some(home) => home.join(".lobbybot"),
        None => PathBuf::from(".lobbybot"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the config file into an untyped tree, before env substitution.
///
/// A missing file is not an error: it yields an empty mapping so that
/// defaults and env fallbacks can still produce a runnable config.
pub async fn load_config(path: &Path) -> Result<Value> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value = parse_config(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(value)
}

/// Parse YAML text. An empty document counts as an empty mapping.
pub fn parse_config(raw: &str) -> Result<Value> {
    let value: Value = serde_yaml::from_str(raw)?;
    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        Value::Object(_) => value,
        other => anyhow::bail!("config root must be a mapping, found {}", type_name(&other)),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lobbybot-config-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn config_file_lives_in_dir() {
        let path = config_file_path(Path::new("/etc/lobbybot"));
        assert_eq!(path, PathBuf::from("/etc/lobbybot/config.yaml"));
    }

    #[test]
    fn empty_document_is_empty_mapping() {
        assert_eq!(parse_config("").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = parse_config("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("a sequence"));
    }

    #[tokio::test]
    async fn missing_file_yields_empty_mapping() {
        let dir = scratch_dir("missing");
        let value = load_config(&dir.join("nope.yaml")).await.unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn loads_yaml_file() {
        let dir = scratch_dir("loads");
        let path = config_file_path(&dir);
        std::fs::write(&path, "invite:\n  expiryMs: 1000\nsteam:\n  apiKey: ${STEAM_API_KEY}\n")
            .unwrap();

        let value = load_config(&path).await.unwrap();
        assert_eq!(value["invite"]["expiryMs"], 1000);
        assert_eq!(value["steam"]["apiKey"], "${STEAM_API_KEY}");
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn malformed_yaml_names_the_file() {
        let dir = scratch_dir("malformed");
        let path = config_file_path(&dir);
        std::fs::write(&path, "discord: [unterminated\n").unwrap();

        let err = load_config(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("config.yaml"));
        std::fs::remove_dir_all(dir).ok();
    }
}
