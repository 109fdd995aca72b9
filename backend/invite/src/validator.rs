//! Syntactic classification of `/steaminvite` input. No network access.

use once_cell::sync::Lazy;
use regex::Regex;

use lobbybot_core::{LinkClass, ProfileReference};

/// `steam://joinlobby/<app>/<lobby>/<owner>`, ASCII digits only.
static DIRECT_INVITE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^steam://joinlobby/[0-9]+/[0-9]+/[0-9]+$").unwrap());

/// Group 1 is a numeric profile id, group 2 a vanity name. Exactly one
/// participates in any match. The trailing slash is required.
static PROFILE_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://steamcommunity\.com/(?:profiles/([a-zA-Z0-9_]+)|id/([a-zA-Z0-9_]+))/$")
        .unwrap()
});

/// Classify a raw reference. Total and deterministic.
pub fn validate(raw: &str) -> LinkClass {
    if DIRECT_INVITE_PATTERN.is_match(raw) {
        return LinkClass::DirectInvite(raw.to_string());
    }

    let Some(caps) = PROFILE_URL_PATTERN.captures(raw) else {
        return LinkClass::Invalid;
    };

    match (caps.get(1), caps.get(2)) {
        (Some(id), None) => LinkClass::Profile(ProfileReference::numeric(id.as_str())),
        (None, Some(name)) => LinkClass::Profile(ProfileReference::vanity(name.as_str())),
        _ => LinkClass::Invalid,
    }
}
