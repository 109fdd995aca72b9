//! CLI Config Commands
//!
//! `config show` prints the effective config with secrets masked;
//! `config check` reports env references and validation findings.

use std::path::Path;

use anyhow::Result;
use lobbybot_config::{
    BotConfig, collect_redacted_paths, collect_referenced_vars, load_config, prepare_with, redact,
    validate,
};

use crate::terminal_output::{note_error, note_info, note_success, note_warn, render_table, Column};

pub async fn show(config_path: &Path) -> Result<()> {
    let config = lobbybot_config::load_and_prepare(config_path).await?;
    let (yaml, masked) = render_redacted(&config)?;
    note_info(&format!("Effective config from {}", config_path.display()));
    print!("{yaml}");
    if !masked.is_empty() {
        note_info(&format!("Masked: {}", masked.join(", ")));
    }
    Ok(())
}

/// Redacted YAML for display, plus the paths that were masked.
fn render_redacted(config: &BotConfig) -> Result<(String, Vec<String>)> {
    let value = serde_json::to_value(config)?;
    let mut masked = collect_redacted_paths(&value);
    masked.sort();
    Ok((serde_yaml::to_string(&redact(&value))?, masked))
}

pub async fn check(config_path: &Path) -> Result<()> {
    note_info(&format!("Checking {}", config_path.display()));
    let raw = load_config(config_path).await?;

    let vars = collect_referenced_vars(&raw);
    if !vars.is_empty() {
        let rows: Vec<Vec<String>> = vars
            .iter()
            .map(|var| {
                let state = match std::env::var(var) {
                    Ok(v) if !v.is_empty() => "set",
                    _ => "missing",
                };
                vec![var.clone(), state.to_string()]
            })
            .collect();
        print!("{}", render_table(&[Column::left("Env var"), Column::left("State")], &rows));
    }

    let config = match prepare_with(&raw, &std::env::vars().collect()) {
        Ok(config) => config,
        Err(e) => {
            note_error(&format!("{e:#}"));
            anyhow::bail!("config could not be loaded");
        }
    };

    let report = validate(&config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    if report.is_valid() {
        note_success("Config is valid");
        Ok(())
    } else {
        anyhow::bail!("{} config error(s)", report.errors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_secrets_and_lists_them() {
        let mut config = BotConfig::default();
        config.discord.token = Some("MTIzNDU2Nzg5.secret-token-value".into());
        config.steam.api_key = Some("ABCDEF0123456789ABCDEF0123456789".into());

        let (yaml, masked) = render_redacted(&config).unwrap();
        assert!(!yaml.contains("secret-token-value"));
        assert!(!yaml.contains("ABCDEF0123456789ABCDEF0123456789"));
        assert_eq!(masked, vec!["discord.token", "steam.apiKey"]);
    }
}
