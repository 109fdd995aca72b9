//! Log Redaction Layer
//!
//! Scrubs Steam Web API keys and Discord bot tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

/// `key=<value>` query parameters, as found in request URLs.
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([?&]key=)[^&\s]+").unwrap());
/// Bare Steam Web API keys.
static STEAM_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9A-Fa-f]{32}\b").unwrap());
/// Discord bot tokens: base64 user id, timestamp, HMAC.
static DISCORD_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[MNO][A-Za-z0-9_-]{23,27}\.[A-Za-z0-9_-]{6}\.[A-Za-z0-9_-]{27,40}").unwrap()
});
/// `Authorization: Bot <token>` headers.
static BOT_AUTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bot\s+[A-Za-z0-9_\-\.]{20,}").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = KEY_PARAM_RE
        .replace_all(input, "${1}[REDACTED_KEY]")
        .to_string();

    redacted = STEAM_KEY_RE.replace_all(&redacted, "[REDACTED_KEY]").to_string();

    redacted = BOT_AUTH_RE.replace_all(&redacted, "Bot [REDACTED_TOKEN]").to_string();
    redacted = DISCORD_TOKEN_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .to_string();

    redacted
}
