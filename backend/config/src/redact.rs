//! Masks secrets so a config snapshot can be printed or logged.

use serde_json::Value;

/// Keys whose string values are always secret, compared case-insensitively.
static SECRET_KEYS: &[&str] = &["token", "apiKey", "api_key", "botToken", "bot_token", "secret"];

const MASK: &str = "***";

/// Redact a config tree, replacing every secret value with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => Value::String(mask(s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// First four characters followed by the mask; short values are fully masked.
fn mask(secret: &str) -> String {
    if secret.chars().count() > 8 {
        format!("{}{MASK}", secret.chars().take(4).collect::<String>())
    } else {
        MASK.to_string()
    }
}

/// Dotted paths of every value [`redact`] would mask.
pub fn collect_redacted_paths(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths_recursive(value, "", "", &mut paths);
    paths
}

fn collect_paths_recursive(value: &Value, key: &str, path: &str, out: &mut Vec<String>) {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => out.push(path.to_string()),
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                collect_paths_recursive(v, key, &format!("{path}[{i}]"), out);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                let child = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                collect_paths_recursive(v, k, &child, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_discord_token_and_steam_key() {
        let v = json!({
            "discord": {"token": "MTA1234567890.abcdef.ghijkl", "guildId": "123"},
            "steam": {"apiKey": "0123456789ABCDEF0123456789ABCDEF"}
        });
        let redacted = redact(&v);
        assert_eq!(redacted["discord"]["token"], "MTA1***");
        assert_eq!(redacted["steam"]["apiKey"], "0123***");
        assert_eq!(redacted["discord"]["guildId"], "123");
    }

    #[test]
    fn short_secrets_are_fully_masked() {
        let redacted = redact(&json!({"steam": {"apiKey": "abc"}}));
        assert_eq!(redacted["steam"]["apiKey"], "***");
    }

    #[test]
    fn empty_secret_stays_empty() {
        let redacted = redact(&json!({"discord": {"token": ""}}));
        assert_eq!(redacted["discord"]["token"], "");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({"logging": {"level": "debug"}, "reactions": [{"emoji": "👀"}]});
        assert_eq!(redact(&v), v);
    }

    #[test]
    fn lists_redacted_paths() {
        let v = json!({"discord": {"token": "abcdefghijk"}, "steam": {"apiKey": "x", "apiBaseUrl": "u"}});
        let mut paths = collect_redacted_paths(&v);
        paths.sort();
        assert_eq!(paths, vec!["discord.token", "steam.apiKey"]);
    }
}
